// JSON liveness data -> Vec<BasicBlock> -> InterferenceGraph
//
// The liveness analysis itself runs upstream; this module only models what it
// hands us: every block with its instruction-ordered values and its live-in /
// live-out sets.

use std::collections::BTreeSet;
use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A program value (virtual register), identified and ordered by name.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Value(String);

impl Value {
  pub fn new(name: impl Into<String>) -> Self {
    Value(name.into())
  }

  pub fn name(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<&str> for Value {
  fn from(name: &str) -> Self {
    Value::new(name)
  }
}

/// A basic block as produced by the liveness analysis.
///
/// Each entry of `instructions` stands for one instruction and names the
/// single value it touches. Instructions with several defs or uses are not
/// representable, which under-counts interferences for them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BasicBlock {
  pub id: u32,
  #[serde(default)]
  pub instructions: Vec<Value>,
  #[serde(default, alias = "liveIn")]
  pub live_in: BTreeSet<Value>,
  #[serde(default, alias = "liveOut")]
  pub live_out: BTreeSet<Value>,
}

impl BasicBlock {
  pub fn new<I, L, O>(id: u32, instructions: I, live_in: L, live_out: O) -> Self
  where
    I: IntoIterator,
    I::Item: Into<Value>,
    L: IntoIterator,
    L::Item: Into<Value>,
    O: IntoIterator,
    O::Item: Into<Value>,
  {
    BasicBlock {
      id,
      instructions: instructions.into_iter().map(Into::into).collect(),
      live_in: live_in.into_iter().map(Into::into).collect(),
      live_out: live_out.into_iter().map(Into::into).collect(),
    }
  }

  /// Every value mentioned by the block, each once, in value order
  pub fn values(&self) -> BTreeSet<&Value> {
    self
      .instructions
      .iter()
      .chain(self.live_in.iter())
      .chain(self.live_out.iter())
      .collect()
  }
}

/// The per-function liveness result consumed by the allocator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LivenessInput {
  pub blocks: Vec<BasicBlock>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInput {
  Wrapped(LivenessInput),
  Bare(Vec<BasicBlock>),
}

impl LivenessInput {
  pub fn new(blocks: Vec<BasicBlock>) -> Self {
    LivenessInput { blocks }
  }

  /// Accepts either `{"blocks": [...]}` or a bare array of blocks.
  pub fn from_json(src: &str) -> Result<Self> {
    let raw: RawInput = serde_json::from_str(src).context("malformed liveness input")?;
    Ok(match raw {
      RawInput::Wrapped(input) => input,
      RawInput::Bare(blocks) => LivenessInput { blocks },
    })
  }

  pub fn from_file(path: &str) -> Result<Self> {
    let src =
      std::fs::read_to_string(path).with_context(|| format!("cannot read input file {}", path))?;
    Self::from_json(&src).with_context(|| format!("while parsing {}", path))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_wrapped_input() {
    let src = r#"{"blocks": [
      {"id": 1, "instructions": ["a", "b", "c"], "live_in": ["a", "b"], "live_out": ["c"]}
    ]}"#;
    let input = LivenessInput::from_json(src).unwrap();
    assert_eq!(
      input.blocks,
      vec![BasicBlock::new(1, ["a", "b", "c"], ["a", "b"], ["c"])]
    );
  }

  #[test]
  fn test_parse_bare_input_with_aliases() {
    let src = r#"[
      {"id": 2, "instructions": ["b", "d", "e"], "liveIn": ["b"], "liveOut": ["d", "e"]},
      {"id": 3}
    ]"#;
    let input = LivenessInput::from_json(src).unwrap();
    assert_eq!(input.blocks.len(), 2);
    assert_eq!(input.blocks[0].live_out, BTreeSet::from([Value::from("d"), Value::from("e")]));
    assert!(input.blocks[1].instructions.is_empty());
    assert!(input.blocks[1].live_in.is_empty());
  }

  #[test]
  fn test_parse_garbage() {
    assert!(LivenessInput::from_json("{\"blocks\": 3}").is_err());
  }

  #[test]
  fn test_misspelled_keys_are_rejected() {
    // a dropped live-out set would silently lose interferences
    assert!(LivenessInput::from_json(r#"[{"id":1,"instructions":["a"],"liveout":["a"]}]"#).is_err());
    assert!(LivenessInput::from_json(
      r#"[{"id":1,"instructions":["a","b"],"live_ouT":["a","b"]}]"#
    )
    .is_err());
    assert!(LivenessInput::from_json(r#"{"blocks": [], "functions": []}"#).is_err());
  }

  #[test]
  fn test_block_values() {
    let block = BasicBlock::new(1, ["b", "a", "b"], ["a"], ["z"]);
    let values = block.values().into_iter().map(Value::name).collect::<Vec<_>>();
    assert_eq!(values, vec!["a", "b", "z"]);
  }
}
