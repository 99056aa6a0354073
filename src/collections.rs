//! Plain containers without rebalancing.
//!
//! These are the small collaborators around the tree engines: a bounds-checked
//! fixed-size array, a separately chaining hash map, a binary tree filled in
//! level order, and a binary min-heap.

mod array;
mod binary_tree;
mod hash_map;
mod heap;

pub use array::FixedArray;
pub use binary_tree::LevelOrderTree;
pub use hash_map::{ChainedHashMap, DEFAULT_CAPACITY, MAX_LOAD_FACTOR};
pub use heap::MinHeap;
