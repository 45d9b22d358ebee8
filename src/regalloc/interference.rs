use std::collections::BTreeSet;

use crate::{regalloc::liveness::BasicBlock, utils::Graph};

use super::{RegAllocError, Value};

/// Represent the interference graph built from per-block liveness.
///
/// Symmetric, free of self loops, and fresh for every allocation attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InterferenceGraph {
  graph: Graph<Value>,
}

impl InterferenceGraph {
  pub fn new() -> Self {
    InterferenceGraph {
      graph: Graph::new(),
    }
  }

  /// Build the interference graph from the liveness of every block.
  ///
  /// Each block is walked backward starting from its live-out set. The value
  /// named by an instruction is taken out of the live set, made to interfere
  /// with everything still live, then put back. Edges from all blocks are
  /// unioned into one function-wide graph. Every value mentioned by a block
  /// becomes a node, even when nothing interferes with it.
  pub fn from_blocks(blocks: &[BasicBlock]) -> Result<Self, RegAllocError> {
    let mut igraph = Self::new();

    for block in blocks {
      for value in block.values() {
        igraph.add_value(value.clone());
      }

      let mut live: BTreeSet<Value> = block.live_out.clone();
      for value in block.instructions.iter().rev() {
        live.remove(value);
        for live_value in &live {
          igraph.add_edge(value.clone(), live_value.clone())?;
        }
        live.insert(value.clone());
      }

      // The backward walk does not model uses, so the set rarely matches
      // live-in exactly. Liveness is trusted as given.
      if live != block.live_in {
        log::trace!(
          "block {}: live set after scan {:?} differs from live-in {:?}",
          block.id,
          live,
          block.live_in
        );
      }
    }

    log::debug!(
      "interference graph: {} values, {} edges",
      igraph.num_values(),
      igraph.num_edges()
    );
    debug_show_interf_graph(&igraph);

    Ok(igraph)
  }

  /// Idempotently record that u and v interfere.
  pub fn add_edge(&mut self, u: Value, v: Value) -> Result<(), RegAllocError> {
    if u == v {
      return Err(RegAllocError::InvalidValue(u));
    }
    self.graph.add_graph_edge(u, v);
    Ok(())
  }

  /// Add a value with no interference (yet).
  pub fn add_value(&mut self, value: Value) {
    self.graph.add_node(value);
  }

  pub fn neighbors(&self, value: &Value) -> Result<&BTreeSet<Value>, RegAllocError> {
    self
      .graph
      .neighbors(value)
      .ok_or_else(|| RegAllocError::UnknownValue(value.clone()))
  }

  pub fn degree(&self, value: &Value) -> Result<usize, RegAllocError> {
    self.neighbors(value).map(BTreeSet::len)
  }

  pub fn is_neighbor(&self, u: &Value, v: &Value) -> Result<bool, RegAllocError> {
    self.neighbors(v)?;
    Ok(self.neighbors(u)?.contains(v))
  }

  pub fn contains(&self, value: &Value) -> bool {
    self.graph.contains(value)
  }

  /// All values, in value order
  pub fn values(&self) -> impl Iterator<Item = &Value> {
    self.graph.nodes()
  }

  /// Values with their neighborhoods, in value order
  pub fn adjacency(&self) -> impl Iterator<Item = (&Value, &BTreeSet<Value>)> {
    self.graph.iter()
  }

  /// Every interference once, as `(smaller, larger)`
  pub fn edges(&self) -> impl Iterator<Item = (&Value, &Value)> {
    self.graph.edges()
  }

  pub fn num_values(&self) -> usize {
    self.graph.len()
  }

  pub fn num_edges(&self) -> usize {
    self.graph.num_edges()
  }

  pub fn is_empty(&self) -> bool {
    self.graph.is_empty()
  }
}

fn debug_show_interf_graph(igraph: &InterferenceGraph) {
  if !log::log_enabled!(log::Level::Debug) {
    return;
  }
  for (value, neighbors) in igraph.adjacency() {
    log::debug!("{}: {:?}", value, neighbors);
  }
}
