//! Ordered sets backed by self-balancing binary search trees.
//!
//! Two interchangeable engines implement the [`OrderedSet`] contract:
//!
//! - [`AvlTree`] keeps every node's subtree heights within one of each other,
//!   rebalancing with rotations on the way back up a recursive insert/delete.
//! - [`RbTree`] colors nodes red or black and restores its color rules with
//!   bottom-up fixup loops after each insert/delete.
//!
//! Both reject duplicate keys and guarantee logarithmic search, insert and
//! delete. The [`collections`] module holds a few plain containers (bounds
//! checked array, chaining hash map, level-order binary tree, min-heap).
//!
//! ```
//! use balanced_set::{AvlTree, OrderedSet, RbTree};
//!
//! fn fill<S: OrderedSet<i32>>(set: &mut S) {
//!     for key in [5, 3, 8, 3] {
//!         set.insert(key);
//!     }
//! }
//!
//! let mut avl = AvlTree::new();
//! let mut rb = RbTree::new();
//! fill(&mut avl);
//! fill(&mut rb);
//! assert_eq!(avl.inorder_traversal(), rb.inorder_traversal());
//! assert_eq!(OrderedSet::len(&avl), 3);
//! ```

pub mod avl;
pub mod collections;
mod error;
pub mod rb;
mod set;

pub use avl::AvlTree;
pub use error::{Error, Result};
pub use rb::{Color, RbTree};
pub use set::OrderedSet;
