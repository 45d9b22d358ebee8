use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use super::Value;

/// What simplify left behind when it got stuck.
///
/// Every spilled value had at least `num_registers` remaining neighbors at
/// that point. Choosing which of them to actually spill is up to the rewrite
/// pass; nothing here is ranked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SpillReport {
  num_registers: usize,
  residual_degree: BTreeMap<Value, usize>,
  simplified: Vec<Value>,
}

impl SpillReport {
  pub(crate) fn new(
    num_registers: usize,
    residual_degree: BTreeMap<Value, usize>,
    simplified: Vec<Value>,
  ) -> Self {
    SpillReport {
      num_registers,
      residual_degree,
      simplified,
    }
  }

  /// The values that could not be colored, in value order
  pub fn spilled(&self) -> BTreeSet<&Value> {
    self.residual_degree.keys().collect()
  }

  pub fn contains(&self, value: &Value) -> bool {
    self.residual_degree.contains_key(value)
  }

  pub fn len(&self) -> usize {
    self.residual_degree.len()
  }

  pub fn is_empty(&self) -> bool {
    self.residual_degree.is_empty()
  }

  /// Degree of a spilled value within the stuck subgraph
  pub fn residual_degree(&self, value: &Value) -> Option<usize> {
    self.residual_degree.get(value).copied()
  }

  pub fn residual_degrees(&self) -> &BTreeMap<Value, usize> {
    &self.residual_degree
  }

  /// Values removed by simplify before it got stuck, in removal order
  pub fn simplified(&self) -> &[Value] {
    &self.simplified
  }

  pub fn num_registers(&self) -> usize {
    self.num_registers
  }
}

impl fmt::Display for SpillReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Spill detected! Simplification failed.")?;
    for (value, degree) in &self.residual_degree {
      writeln!(
        f,
        "{} (degree {} >= {})",
        value, degree, self.num_registers
      )?;
    }
    Ok(())
  }
}
