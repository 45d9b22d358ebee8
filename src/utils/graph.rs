use std::collections::{BTreeMap, BTreeSet};

/// Graph structure:
/// An ordered map from each node to the ordered set of nodes connected to it.
/// Iteration always follows the node order, so anything derived from the
/// graph is reproducible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph<T: Ord>(BTreeMap<T, BTreeSet<T>>);

impl<T: Ord> Default for Graph<T> {
  fn default() -> Self {
    Graph(BTreeMap::new())
  }
}

impl<T: Ord + Clone> Graph<T> {
  pub fn new() -> Self {
    Graph(BTreeMap::new())
  }

  /// Return the neighbors of a node
  ///
  /// # Return
  /// If the node does not exist, return None
  /// If there is no neighbor for this node, return an empty set
  pub fn neighbors(&self, node: &T) -> Option<&BTreeSet<T>> {
    self.0.get(node)
  }

  pub fn contains(&self, node: &T) -> bool {
    self.0.contains_key(node)
  }

  /// Iterate over all nodes in order
  pub fn nodes(&self) -> impl Iterator<Item = &T> {
    self.0.keys()
  }

  /// Iterate over all nodes with their neighborhoods, in node order
  pub fn iter(&self) -> impl Iterator<Item = (&T, &BTreeSet<T>)> {
    self.0.iter()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Idempotently add a node into the graph
  pub fn add_node(&mut self, node: T) {
    self.0.entry(node).or_default();
  }

  /// Add an undirected edge between two nodes, i.e. node1 and node2.
  /// Both nodes are created if missing.
  pub fn add_graph_edge(&mut self, node1: T, node2: T) {
    self.0.entry(node1.clone()).or_default().insert(node2.clone());
    self.0.entry(node2).or_default().insert(node1);
  }

  /// Every undirected edge exactly once, as `(smaller, larger)`
  pub fn edges(&self) -> impl Iterator<Item = (&T, &T)> {
    self
      .0
      .iter()
      .flat_map(|(node, neighs)| neighs.iter().filter(move |n| node < *n).map(move |n| (node, n)))
  }

  pub fn num_edges(&self) -> usize {
    self.0.values().map(BTreeSet::len).sum::<usize>() / 2
  }
}
