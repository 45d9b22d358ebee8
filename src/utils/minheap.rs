use std::cmp::Reverse;
use std::collections::BinaryHeap;

pub struct MinHeap<T: Ord>(BinaryHeap<Reverse<T>>);

impl<T: Ord> MinHeap<T> {
  pub fn new() -> Self {
    MinHeap(BinaryHeap::<Reverse<T>>::new())
  }

  pub fn push(&mut self, item: T) {
    self.0.push(Reverse(item));
  }

  pub fn pop(&mut self) -> Option<T> {
    self.0.pop().map(|v| v.0)
  }
}

impl<T: Ord> Default for MinHeap<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl MinHeap<usize> {
  /// Drain the heap and return the smallest index that was never pushed.
  /// Duplicates are allowed.
  pub fn find_smallest_absent(&mut self) -> usize {
    let mut i = 0;
    while let Some(v) = self.pop() {
      // v < i means a duplicate of something already seen
      if v < i {
        continue;
      }

      if v != i {
        return i;
      }

      i += 1;
    }
    i
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn lowest_free_color(neighbor_colors: &[usize]) -> usize {
    let mut heap = MinHeap::new();
    for color in neighbor_colors {
      heap.push(*color);
    }
    heap.find_smallest_absent()
  }

  #[test]
  fn test_no_colored_neighbors_gets_first_color() {
    assert_eq!(lowest_free_color(&[]), 0);
  }

  #[test]
  fn test_fills_the_first_gap() {
    // neighbors hold R1, R2 and R4
    assert_eq!(lowest_free_color(&[3, 0, 1]), 2);
    assert_eq!(lowest_free_color(&[1, 2]), 0);
  }

  #[test]
  fn test_neighbors_sharing_a_color() {
    // several neighbors may share a register when they do not interfere
    assert_eq!(lowest_free_color(&[0, 1, 0, 1, 3]), 2);
    assert_eq!(lowest_free_color(&[0, 0, 0]), 1);
  }

  #[test]
  fn test_every_color_taken_returns_k() {
    // with k = 4 and R1..R4 all taken, the answer is out of the palette
    assert_eq!(lowest_free_color(&[2, 3, 1, 0]), 4);
  }
}
