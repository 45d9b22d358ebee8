mod buckets;
mod graph;
mod minheap;

pub use buckets::DegreeBuckets;
pub use graph::Graph;
pub use minheap::MinHeap;
