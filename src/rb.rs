//! An ordered set implemented with a red-black tree.
//!
//! Nodes live in an arena owned by the tree and refer to each other by index.
//! The parent index is a plain back-reference used to walk upward during the
//! fixup loops; ownership stays with the arena.

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use log::trace;

use crate::set::OrderedSet;

/// The color of a red-black tree node. Absent children count as black.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// An ordered set implemented with a red-black tree.
///
/// ```
/// use balanced_set::RbTree;
/// let mut tree: RbTree<i32> = (1..=7).collect();
/// assert!(tree.search(&4));
/// assert!(tree.is_balanced());
/// tree.delete(&4);
/// assert_eq!(tree.inorder_traversal(), vec![1, 2, 3, 5, 6, 7]);
/// ```
#[derive(Clone)]
pub struct RbTree<K> {
    nodes: Vec<Node<K>>,
    root: Link,
}

#[derive(Clone)]
struct Node<K> {
    key: K,
    color: Color,
    parent: Link,
    left: Link,
    right: Link,
}

type NodeIdx = usize;
type Link = Option<NodeIdx>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// An iterator over the keys of a red-black tree, in ascending order.
pub struct Iter<'a, K> {
    nodes: &'a [Node<K>],
    stack: Vec<NodeIdx>,
}

impl<K: Ord> RbTree<K> {
    /// Creates an empty tree.
    /// No memory is allocated until the first key is inserted.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    /// Returns the number of black nodes on any path from the root down to an
    /// absent child, not counting the absent child itself.
    pub fn black_height(&self) -> usize {
        let mut count = 0;
        let mut current = self.root;
        while let Some(idx) = current {
            if self.nodes[idx].color == Color::Black {
                count += 1;
            }
            current = self.nodes[idx].left;
        }
        count
    }

    /// Returns true if the tree contains the key.
    pub fn search(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Returns a reference to the key in the tree that is equal to the given key.
    pub fn get(&self, key: &K) -> Option<&K> {
        self.find(key).map(|idx| &self.nodes[idx].key)
    }

    /// Inserts a key into the tree.
    /// Returns whether the key was newly inserted; a present key leaves the tree untouched.
    pub fn insert(&mut self, key: K) -> bool {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(idx) = current {
            side = match key.cmp(&self.nodes[idx].key) {
                Ordering::Equal => return false,
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            parent = Some(idx);
            current = self.child(idx, side);
        }

        let idx = self.nodes.len();
        self.nodes.push(Node::create(key, parent));
        match parent {
            None => self.root = Some(idx),
            Some(parent) => self.set_child(parent, side, Some(idx)),
        }
        self.insert_fixup(idx);
        true
    }

    /// Removes a key from the tree.
    /// Returns whether the key was previously in the tree.
    pub fn delete(&mut self, key: &K) -> bool {
        let Some(mut target) = self.find(key) else {
            return false;
        };

        // With two children, take over the in-order successor's key and remove
        // the successor node instead. It has no left child.
        if let (Some(_), Some(right)) = (self.nodes[target].left, self.nodes[target].right) {
            let successor = self.minimum(right);
            self.swap_keys(target, successor);
            target = successor;
        }

        let replacement = self.nodes[target].left.or(self.nodes[target].right);
        let parent = self.nodes[target].parent;
        let removed_color = self.nodes[target].color;
        self.transplant(target, replacement);
        if removed_color == Color::Black {
            self.delete_fixup(replacement, parent);
        }
        self.release(target);
        true
    }

    /// Checks the red-black invariants: black root, no red node with a red
    /// child, and the same black height on every path.
    /// Walks the whole tree; meant as a diagnostic.
    pub fn is_balanced(&self) -> bool {
        !self.is_red(self.root) && self.checked_black_height(self.root).is_some()
    }

    /// Returns the keys in ascending order.
    pub fn inorder_traversal(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Gets an iterator over the keys of the tree, in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        let mut iter = Iter {
            nodes: &self.nodes,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        // Check root link
        if let Some(root) = self.root {
            assert!(self.nodes[root].parent.is_none());
            assert_eq!(self.nodes[root].color, Color::Black);
        } else {
            assert!(self.nodes.is_empty());
        }

        // Check tree nodes
        let mut num_nodes = 0;
        self.check_subtree(self.root, None, &mut num_nodes);

        // Check number of nodes
        assert_eq!(num_nodes, self.nodes.len());

        // Check order
        assert!(crate::set::is_strictly_ascending(self.iter()));
    }

    /// Returns the black height of the subtree, asserting on every violation.
    #[cfg(any(test, feature = "consistency_check"))]
    fn check_subtree(&self, link: Link, parent: Link, num_nodes: &mut usize) -> usize {
        let Some(idx) = link else {
            return 0;
        };
        let node = &self.nodes[idx];
        *num_nodes += 1;

        // Check back-reference
        assert_eq!(node.parent, parent);

        // Check for consecutive red nodes
        if node.color == Color::Red {
            assert!(!self.is_red(node.left));
            assert!(!self.is_red(node.right));
        }

        // Check black height
        let left_black_height = self.check_subtree(node.left, link, num_nodes);
        let right_black_height = self.check_subtree(node.right, link, num_nodes);
        assert_eq!(left_black_height, right_black_height);

        left_black_height + usize::from(node.color == Color::Black)
    }

    fn find(&self, key: &K) -> Link {
        let mut current = self.root;
        while let Some(idx) = current {
            current = match key.cmp(&self.nodes[idx].key) {
                Ordering::Equal => break,
                Ordering::Less => self.nodes[idx].left,
                Ordering::Greater => self.nodes[idx].right,
            };
        }
        current
    }

    fn insert_fixup(&mut self, mut node: NodeIdx) {
        while let Some(parent) = self.nodes[node].parent {
            if self.nodes[parent].color == Color::Black {
                break;
            }
            // A red parent is never the root, so there is a grandparent.
            let Some(grandparent) = self.nodes[parent].parent else {
                break;
            };
            let side = self.side_of(parent, grandparent);
            let uncle = self.child(grandparent, side.opposite());

            if self.is_red(uncle) {
                trace!("rb insert: red uncle, recolor and move up");
                self.set_color(Some(parent), Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(Some(grandparent), Color::Red);
                node = grandparent;
                continue;
            }

            // Turn an inner child into an outer one.
            let (outer, parent) = if self.child(parent, side.opposite()) == Some(node) {
                trace!("rb insert: black uncle, inner child");
                self.rotate(parent, side);
                (parent, node)
            } else {
                (node, parent)
            };

            trace!("rb insert: black uncle, outer child");
            self.set_color(Some(parent), Color::Black);
            self.set_color(Some(grandparent), Color::Red);
            self.rotate(grandparent, side.opposite());
            node = outer;
        }

        self.set_color(self.root, Color::Black);
    }

    /// Restores the black height after a black node was unlinked. `current` is
    /// the position that lost a black node, `parent` its parent, tracked
    /// separately since `current` may be an absent child.
    fn delete_fixup(&mut self, mut current: Link, mut parent: Link) {
        while current != self.root && !self.is_red(current) {
            let Some(p) = parent else {
                break;
            };
            let side = if self.nodes[p].left == current {
                Side::Left
            } else {
                Side::Right
            };
            let far = side.opposite();

            // The deficient side is one black short, so the sibling exists.
            let Some(mut sibling) = self.child(p, far) else {
                break;
            };

            if self.is_red(Some(sibling)) {
                trace!("rb delete: red sibling");
                self.set_color(Some(sibling), Color::Black);
                self.set_color(Some(p), Color::Red);
                self.rotate(p, side);
                sibling = match self.child(p, far) {
                    Some(sibling) => sibling,
                    None => break,
                };
            }

            let near_child = self.child(sibling, side);
            let far_child = self.child(sibling, far);
            if !self.is_red(near_child) && !self.is_red(far_child) {
                trace!("rb delete: black sibling with black children, move up");
                self.set_color(Some(sibling), Color::Red);
                current = Some(p);
                parent = self.nodes[p].parent;
                continue;
            }

            if !self.is_red(far_child) {
                trace!("rb delete: black sibling with red near child");
                self.set_color(near_child, Color::Black);
                self.set_color(Some(sibling), Color::Red);
                self.rotate(sibling, far);
                sibling = match self.child(p, far) {
                    Some(sibling) => sibling,
                    None => break,
                };
            }

            trace!("rb delete: black sibling with red far child");
            let parent_color = self.nodes[p].color;
            self.set_color(Some(sibling), parent_color);
            self.set_color(Some(p), Color::Black);
            self.set_color(self.child(sibling, far), Color::Black);
            self.rotate(p, side);
            current = self.root;
            parent = None;
        }

        self.set_color(current, Color::Black);
    }

    fn minimum(&self, mut idx: NodeIdx) -> NodeIdx {
        while let Some(left) = self.nodes[idx].left {
            idx = left;
        }
        idx
    }

    fn swap_keys(&mut self, a: NodeIdx, b: NodeIdx) {
        if a == b {
            return;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.nodes.split_at_mut(hi);
        mem::swap(&mut head[lo].key, &mut tail[0].key);
    }
}

impl<K> RbTree<K> {
    fn child(&self, idx: NodeIdx, side: Side) -> Link {
        match side {
            Side::Left => self.nodes[idx].left,
            Side::Right => self.nodes[idx].right,
        }
    }

    fn set_child(&mut self, idx: NodeIdx, side: Side, link: Link) {
        match side {
            Side::Left => self.nodes[idx].left = link,
            Side::Right => self.nodes[idx].right = link,
        }
    }

    /// Returns the side of `parent` that `idx` hangs off.
    fn side_of(&self, idx: NodeIdx, parent: NodeIdx) -> Side {
        if self.nodes[parent].left == Some(idx) {
            Side::Left
        } else {
            Side::Right
        }
    }

    fn is_red(&self, link: Link) -> bool {
        link.is_some_and(|idx| self.nodes[idx].color == Color::Red)
    }

    fn set_color(&mut self, link: Link, color: Color) {
        if let Some(idx) = link {
            self.nodes[idx].color = color;
        }
    }

    fn subtree_height(&self, link: Link) -> usize {
        match link {
            None => 0,
            Some(idx) => {
                let node = &self.nodes[idx];
                1 + self.subtree_height(node.left).max(self.subtree_height(node.right))
            }
        }
    }

    fn checked_black_height(&self, link: Link) -> Option<usize> {
        let Some(idx) = link else {
            return Some(0);
        };
        let node = &self.nodes[idx];
        if node.color == Color::Red && (self.is_red(node.left) || self.is_red(node.right)) {
            return None;
        }
        let left = self.checked_black_height(node.left)?;
        let right = self.checked_black_height(node.right)?;
        (left == right).then_some(left + usize::from(node.color == Color::Black))
    }

    /// Points whatever referred to `old` (a child link of `parent`, or the
    /// root) at `new`.
    fn replace_child(&mut self, parent: Link, old: NodeIdx, new: Link) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_of(old, parent);
                self.set_child(parent, side, new);
            }
        }
    }

    /// Rotates the subtree at `idx` toward `side`: the child on the other side
    /// is promoted and `idx` becomes its `side` child.
    fn rotate(&mut self, idx: NodeIdx, side: Side) {
        let Some(promoted) = self.child(idx, side.opposite()) else {
            return;
        };

        let middle = self.child(promoted, side);
        self.set_child(idx, side.opposite(), middle);
        if let Some(middle) = middle {
            self.nodes[middle].parent = Some(idx);
        }

        let parent = self.nodes[idx].parent;
        self.nodes[promoted].parent = parent;
        self.replace_child(parent, idx, Some(promoted));

        self.set_child(promoted, side, Some(idx));
        self.nodes[idx].parent = Some(promoted);
    }

    /// Puts `replacement` in the position of `idx`, re-parenting it.
    fn transplant(&mut self, idx: NodeIdx, replacement: Link) {
        let parent = self.nodes[idx].parent;
        self.replace_child(parent, idx, replacement);
        if let Some(replacement) = replacement {
            self.nodes[replacement].parent = parent;
        }
    }

    /// Drops an unlinked node from the arena. The last node moves into the
    /// freed slot, so its links are re-pointed first.
    fn release(&mut self, idx: NodeIdx) {
        let last = self.nodes.len() - 1;
        if idx != last {
            let moved = &self.nodes[last];
            let (parent, left, right) = (moved.parent, moved.left, moved.right);
            match parent {
                None => self.root = Some(idx),
                Some(parent) => {
                    let side = self.side_of(last, parent);
                    self.set_child(parent, side, Some(idx));
                }
            }
            for child in [left, right].into_iter().flatten() {
                self.nodes[child].parent = Some(idx);
            }
        }
        self.nodes.swap_remove(idx);
    }
}

impl<K> Node<K> {
    fn create(key: K, parent: Link) -> Self {
        Node {
            key,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }
}

impl<'a, K> Iter<'a, K> {
    fn push_left_spine(&mut self, mut link: Link) {
        while let Some(idx) = link {
            self.stack.push(idx);
            link = self.nodes[idx].left;
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let nodes = self.nodes;
        self.push_left_spine(nodes[idx].right);
        Some(&nodes[idx].key)
    }
}

impl<'a, K: Ord> IntoIterator for &'a RbTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord> Default for RbTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> FromIterator<K> for RbTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for RbTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for RbTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Ord> OrderedSet<K> for RbTree<K> {
    fn search(&self, key: &K) -> bool {
        RbTree::search(self, key)
    }

    fn insert(&mut self, key: K) -> bool {
        RbTree::insert(self, key)
    }

    fn delete(&mut self, key: &K) -> bool {
        RbTree::delete(self, key)
    }

    fn len(&self) -> usize {
        RbTree::len(self)
    }

    fn is_empty(&self) -> bool {
        RbTree::is_empty(self)
    }
}
