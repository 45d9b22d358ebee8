// The module builds the interference graph from per-block liveness, and
// colors it with simplify/select. A spill is reported back to the caller, who
// is expected to rewrite the program and run the whole pipeline again.
mod allocation;
mod error;
mod interference;
mod liveness;
mod spill;

pub use allocation::{Allocation, AllocationResult, Allocator, TieBreak};
pub use error::RegAllocError;
pub use interference::InterferenceGraph;
pub use liveness::{BasicBlock, LivenessInput, Value};
pub use spill::SpillReport;

use crate::registers::Palette;

/// Color an interference graph with the default tie-break.
pub fn allocate(
  igraph: &InterferenceGraph,
  palette: &Palette,
) -> Result<AllocationResult, RegAllocError> {
  Allocator::new(igraph, palette)?.allocate()
}

/// One full allocation attempt: blocks -> interference graph -> coloring.
pub fn allocate_blocks(
  blocks: &[BasicBlock],
  palette: &Palette,
  tie_break: TieBreak,
) -> Result<(InterferenceGraph, AllocationResult), RegAllocError> {
  let igraph = InterferenceGraph::from_blocks(blocks)?;
  let result = Allocator::new(&igraph, palette)?
    .with_tie_break(tie_break)
    .allocate()?;
  Ok((igraph, result))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::registers::Register;

  fn v(name: &str) -> Value {
    Value::new(name)
  }

  fn none() -> Vec<&'static str> {
    vec![]
  }

  #[test]
  fn test_two_blocks() {
    let blocks = vec![
      BasicBlock::new(1, ["a", "b", "c"], ["a", "b"], ["c"]),
      BasicBlock::new(2, ["b", "d", "e"], ["b"], ["d", "e"]),
    ];
    let palette = Palette::with_size(4).unwrap();
    let (igraph, result) = allocate_blocks(&blocks, &palette, TieBreak::default()).unwrap();

    let allocation = result.into_allocated().unwrap();
    assert_eq!(allocation.len(), 5);
    for name in ["a", "b", "c", "d", "e"] {
      assert!(allocation.get(&v(name)).is_some());
    }
    assert!(allocation.conflicts(&igraph).is_empty());
    assert_ne!(allocation.get(&v("a")), allocation.get(&v("c")));
  }

  #[test]
  fn test_five_live_values_spill() {
    let names = ["a", "b", "c", "d", "e"];
    let blocks = vec![BasicBlock::new(1, names, none(), names)];
    let palette = Palette::with_size(4).unwrap();
    let (igraph, result) = allocate_blocks(&blocks, &palette, TieBreak::default()).unwrap();

    assert_eq!(igraph.num_edges(), 10);
    let report = result.into_spilled().unwrap();
    assert!(!report.is_empty());
    for value in report.spilled() {
      assert!(report.residual_degree(value).unwrap() >= 4);
    }
  }

  #[test]
  fn test_single_value_gets_first_register() {
    let blocks = vec![BasicBlock::new(1, ["x"], ["x"], ["x"])];
    let (_, result) = allocate_blocks(&blocks, &Palette::default(), TieBreak::default()).unwrap();

    let allocation = result.into_allocated().unwrap();
    assert_eq!(allocation.len(), 1);
    assert_eq!(allocation.get(&v("x")), Some(&Register::new("R1")));
  }

  #[test]
  fn test_no_blocks() {
    let (igraph, result) = allocate_blocks(&[], &Palette::default(), TieBreak::default()).unwrap();
    assert!(igraph.is_empty());
    assert!(result.as_allocated().unwrap().is_empty());
  }

  #[test]
  fn test_every_instruction_value_is_allocated() {
    let blocks = vec![
      BasicBlock::new(1, ["t0", "t1"], none(), ["t1"]),
      BasicBlock::new(2, ["t2"], none(), none()),
      BasicBlock::new(3, ["t3", "t4"], ["t3"], ["t4"]),
      BasicBlock::new(4, none(), ["t4"], ["t4"]),
    ];
    let palette = Palette::with_size(2).unwrap();
    let (igraph, result) = allocate_blocks(&blocks, &palette, TieBreak::LowestValue).unwrap();

    let allocation = result.into_allocated().unwrap();
    for block in &blocks {
      for value in &block.instructions {
        assert!(allocation.get(value).is_some(), "{} not allocated", value);
      }
    }
    assert!(allocation.conflicts(&igraph).is_empty());
  }

  #[test]
  fn test_same_input_same_output() {
    let blocks = vec![
      BasicBlock::new(1, ["a", "b", "c", "d"], ["a"], ["b", "c", "d"]),
      BasicBlock::new(2, ["c", "e", "f"], ["c"], ["e", "f", "a"]),
    ];
    let palette = Palette::with_size(3).unwrap();
    for tie_break in [TieBreak::LowestDegree, TieBreak::LowestValue] {
      let (_, first) = allocate_blocks(&blocks, &palette, tie_break).unwrap();
      let (_, second) = allocate_blocks(&blocks, &palette, tie_break).unwrap();
      assert_eq!(first, second);
    }
  }

  #[test]
  fn test_allocate_graph_directly() {
    let mut igraph = InterferenceGraph::new();
    igraph.add_edge(v("u"), v("w")).unwrap();
    let result = allocate(&igraph, &Palette::with_size(1).unwrap()).unwrap();
    assert!(result.is_spilled());
  }
}
