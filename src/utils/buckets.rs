use std::collections::BTreeSet;

/// Worklist of node indices bucketed by their current degree.
///
/// `buckets[d]` holds every live node whose degree is `d`, and `node_bucket`
/// remembers where each node lives (`None` once it has been removed). Nodes
/// within a bucket are ordered by index, which keeps every pick reproducible.
#[derive(Debug, Clone)]
pub struct DegreeBuckets {
  buckets: Vec<BTreeSet<usize>>,
  node_bucket: Vec<Option<usize>>,
  len: usize,
}

impl DegreeBuckets {
  /// Seed the worklist with `degrees[i]` as the degree of node `i`.
  pub fn from_degrees(degrees: &[usize]) -> Self {
    let max_degree = degrees.iter().copied().max().unwrap_or(0);
    let mut buckets = vec![BTreeSet::new(); max_degree + 1];
    for (node, degree) in degrees.iter().enumerate() {
      buckets[*degree].insert(node);
    }

    DegreeBuckets {
      buckets,
      node_bucket: degrees.iter().copied().map(Some).collect(),
      len: degrees.len(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Current degree of a node still in the worklist
  pub fn degree(&self, node: usize) -> Option<usize> {
    self.node_bucket.get(node).copied().flatten()
  }

  /// Move a node one bucket down. Nodes already removed, or already at
  /// degree zero, are left untouched.
  pub fn decrement(&mut self, node: usize) {
    if let Some(degree) = self.degree(node) {
      if degree == 0 {
        return;
      }
      self.buckets[degree].remove(&node);
      self.buckets[degree - 1].insert(node);
      self.node_bucket[node] = Some(degree - 1);
    }
  }

  /// Remove and return the lowest-index node of the lowest non-empty bucket
  /// strictly below `limit`.
  pub fn pop_min_degree_below(&mut self, limit: usize) -> Option<usize> {
    let node = self
      .buckets
      .iter()
      .take(limit)
      .find_map(|bucket| bucket.iter().next().copied())?;
    self.remove(node);
    Some(node)
  }

  /// Remove and return the lowest-index node among all buckets strictly
  /// below `limit`.
  pub fn pop_min_index_below(&mut self, limit: usize) -> Option<usize> {
    let node = self
      .buckets
      .iter()
      .take(limit)
      .filter_map(|bucket| bucket.iter().next().copied())
      .min()?;
    self.remove(node);
    Some(node)
  }

  /// Every node still in the worklist with its current degree, by index
  pub fn remaining(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
    self
      .node_bucket
      .iter()
      .enumerate()
      .filter_map(|(node, degree)| degree.map(|d| (node, d)))
  }

  fn remove(&mut self, node: usize) {
    if let Some(degree) = self.node_bucket[node].take() {
      self.buckets[degree].remove(&node);
      self.len -= 1;
    }
  }
}
