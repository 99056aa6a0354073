//! An ordered set implemented with an AVL tree.

use std::cmp::{self, Ordering};
use std::collections::VecDeque;
use std::fmt;

use log::trace;

use crate::set::OrderedSet;

/// An ordered set implemented with an AVL tree.
///
/// ```
/// use balanced_set::AvlTree;
/// let mut tree = AvlTree::new();
/// tree.insert(10);
/// tree.insert(20);
/// tree.insert(30);
/// assert!(tree.search(&20));
/// assert_eq!(tree.inorder_traversal(), vec![10, 20, 30]);
/// assert_eq!(tree.tree_height(), 2);
/// tree.delete(&20);
/// assert!(!tree.search(&20));
/// ```
#[derive(Clone)]
pub struct AvlTree<K> {
    root: Link<K>,
}

#[derive(Clone)]
struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
    height: usize,
}

type Link<K> = Option<Box<Node<K>>>;

/// An iterator over the keys of an AVL tree, in ascending order.
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<K: Ord> AvlTree<K> {
    /// Creates an empty tree.
    /// No memory is allocated until the first key is inserted.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of keys in the tree.
    /// The count is not cached, this walks the whole tree.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns the height of the tree, 0 for an empty tree and 1 for a single node.
    pub fn tree_height(&self) -> usize {
        height(&self.root)
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Returns true if the tree contains the key.
    pub fn search(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Returns a reference to the key in the tree that is equal to the given key.
    pub fn get(&self, key: &K) -> Option<&K> {
        self.find(key).map(|node| &node.key)
    }

    /// Inserts a key into the tree.
    /// Returns whether the key was newly inserted; a present key leaves the tree untouched.
    pub fn insert(&mut self, key: K) -> bool {
        let (root, landed) = Self::insert_node(self.root.take(), key);
        self.root = Some(root);
        landed.is_some()
    }

    /// Removes a key from the tree.
    /// Returns whether the key was previously in the tree.
    pub fn delete(&mut self, key: &K) -> bool {
        let (root, deleted) = Self::delete_node(self.root.take(), key);
        self.root = root;
        deleted
    }

    /// Checks that every node satisfies the AVL condition.
    /// Walks the whole tree; meant as a diagnostic.
    pub fn is_balanced(&self) -> bool {
        fn check<K>(link: &Link<K>) -> bool {
            match link {
                None => true,
                Some(node) => {
                    node.balance_factor().abs() <= 1 && check(&node.left) && check(&node.right)
                }
            }
        }
        check(&self.root)
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
        Iter::new(self.root.as_deref())
    }

    /// Calls `f` on every key, level by level from the root, left to right.
    pub fn traverse_level_order<F: FnMut(&K)>(&self, mut f: F) {
        let mut queue: VecDeque<&Node<K>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = queue.pop_front() {
            f(&node.key);
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        fn check<K>(link: &Link<K>) -> usize {
            let Some(node) = link else {
                return 0;
            };
            let left_height = check(&node.left);
            let right_height = check(&node.right);

            // Check height
            assert_eq!(node.height, 1 + cmp::max(left_height, right_height));

            // Check AVL condition (nearly balance)
            assert!(left_height <= right_height + 1);
            assert!(right_height <= left_height + 1);

            node.height
        }
        check(&self.root);

        // Check order
        assert!(crate::set::is_strictly_ascending(self.iter()));
    }

    fn find(&self, key: &K) -> Option<&Node<K>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => break,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        current
    }

    /// Inserts `key` below `link` and returns the new subtree root.
    ///
    /// The direction is the one the key took at this level (`Equal` for the
    /// freshly created leaf), or `None` if the key was already present and
    /// nothing changed.
    fn insert_node(link: Link<K>, key: K) -> (Box<Node<K>>, Option<Ordering>) {
        let mut node = match link {
            None => return (Node::create(key), Some(Ordering::Equal)),
            Some(node) => node,
        };

        let direction = key.cmp(&node.key);
        let child_landed = match direction {
            Ordering::Equal => return (node, None),
            Ordering::Less => {
                let (left, landed) = Self::insert_node(node.left.take(), key);
                node.left = Some(left);
                landed
            }
            Ordering::Greater => {
                let (right, landed) = Self::insert_node(node.right.take(), key);
                node.right = Some(right);
                landed
            }
        };
        let Some(child_landed) = child_landed else {
            return (node, None);
        };

        node.adjust_height();
        let balance = node.balance_factor();
        // The heavy side is the one the key went down. A key that went to the
        // inner side of the heavy child needs the double rotation.
        let node = if balance > 1 {
            Self::rebalance_node(node, child_landed == Ordering::Greater)
        } else if balance < -1 {
            Self::rebalance_node(node, child_landed == Ordering::Less)
        } else {
            node
        };
        (node, Some(direction))
    }

    /// Removes `key` below `link` and returns the new subtree root and whether
    /// a node was removed.
    fn delete_node(link: Link<K>, key: &K) -> (Link<K>, bool) {
        let Some(mut node) = link else {
            return (None, false);
        };

        let deleted = match key.cmp(&node.key) {
            Ordering::Less => {
                let (left, deleted) = Self::delete_node(node.left.take(), key);
                node.left = left;
                deleted
            }
            Ordering::Greater => {
                let (right, deleted) = Self::delete_node(node.right.take(), key);
                node.right = right;
                deleted
            }
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (None, None) => return (None, true),
                (Some(child), None) | (None, Some(child)) => return (Some(child), true),
                (Some(left), Some(right)) => {
                    // Take over the key of the in-order successor, then drop its node.
                    let (right, successor) = Self::remove_min(right);
                    node.key = successor.key;
                    node.left = Some(left);
                    node.right = right;
                    true
                }
            },
        };
        if !deleted {
            return (Some(node), false);
        }
        (Some(Self::rebalance_after_delete(node)), true)
    }

    /// Unlinks the leftmost node of the subtree, rebalancing on the way back up.
    /// Returns the new subtree root and the unlinked node.
    fn remove_min(mut node: Box<Node<K>>) -> (Link<K>, Box<Node<K>>) {
        match node.left.take() {
            None => {
                let right = node.right.take();
                (right, node)
            }
            Some(left) => {
                let (left, min) = Self::remove_min(left);
                node.left = left;
                (Some(Self::rebalance_after_delete(node)), min)
            }
        }
    }

    /// After a removal the removed key's path is gone, so the rotation case is
    /// picked from the balance of the heavy child.
    fn rebalance_after_delete(mut node: Box<Node<K>>) -> Box<Node<K>> {
        node.adjust_height();
        let balance = node.balance_factor();
        if balance > 1 {
            let double = balance_factor(&node.left) < 0;
            Self::rebalance_node(node, double)
        } else if balance < -1 {
            let double = balance_factor(&node.right) > 0;
            Self::rebalance_node(node, double)
        } else {
            node
        }
    }

    /// Restores the AVL condition at a node whose balance factor is +2 or -2.
    /// `double` selects the Left-Right or Right-Left case.
    fn rebalance_node(mut node: Box<Node<K>>, double: bool) -> Box<Node<K>> {
        if node.balance_factor() > 1 {
            // Rebalance right
            if double {
                trace!("avl: left-right rotation");
                node.left = node.left.take().map(Self::rotate_left);
            } else {
                trace!("avl: left-left rotation");
            }
            Self::rotate_right(node)
        } else {
            // Rebalance left
            if double {
                trace!("avl: right-left rotation");
                node.right = node.right.take().map(Self::rotate_right);
            } else {
                trace!("avl: right-right rotation");
            }
            Self::rotate_left(node)
        }
    }

    fn rotate_left(mut node: Box<Node<K>>) -> Box<Node<K>> {
        match node.right.take() {
            None => node,
            Some(mut right) => {
                node.right = right.left.take();
                node.adjust_height();
                right.left = Some(node);
                right.adjust_height();
                right
            }
        }
    }

    fn rotate_right(mut node: Box<Node<K>>) -> Box<Node<K>> {
        match node.left.take() {
            None => node,
            Some(mut left) => {
                node.left = left.right.take();
                node.adjust_height();
                left.right = Some(node);
                left.adjust_height();
                left
            }
        }
    }
}

impl<K> Node<K> {
    fn create(key: K) -> Box<Self> {
        Box::new(Node {
            key,
            left: None,
            right: None,
            height: 1,
        })
    }

    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    fn adjust_height(&mut self) {
        self.height = 1 + cmp::max(height(&self.left), height(&self.right));
    }
}

fn height<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

fn balance_factor<K>(link: &Link<K>) -> isize {
    link.as_ref().map_or(0, |node| node.balance_factor())
}

impl<'a, K> Iter<'a, K> {
    fn new(root: Option<&'a Node<K>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Option<&'a Node<K>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.key)
    }
}

impl<'a, K: Ord> IntoIterator for &'a AvlTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for AvlTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for AvlTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Ord> OrderedSet<K> for AvlTree<K> {
    fn search(&self, key: &K) -> bool {
        AvlTree::search(self, key)
    }

    fn insert(&mut self, key: K) -> bool {
        AvlTree::insert(self, key)
    }

    fn delete(&mut self, key: &K) -> bool {
        AvlTree::delete(self, key)
    }

    fn len(&self) -> usize {
        AvlTree::len(self)
    }

    fn is_empty(&self) -> bool {
        AvlTree::is_empty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::AvlTree;

    fn root_key<K: Ord + Copy>(tree: &AvlTree<K>) -> Option<K> {
        tree.root.as_ref().map(|node| node.key)
    }

    fn children<K: Ord + Copy>(tree: &AvlTree<K>) -> (Option<K>, Option<K>) {
        let root = tree.root.as_ref().expect("tree is empty");
        (
            root.left.as_ref().map(|node| node.key),
            root.right.as_ref().map(|node| node.key),
        )
    }

    #[test]
    fn test_right_right_case() {
        // 10 ->    20
        //   \     /  \
        //    20  10  30
        //      \
        //       30
        let mut tree = AvlTree::new();
        for key in [10, 20, 30] {
            tree.insert(key);
        }
        tree.check_consistency();
        assert_eq!(root_key(&tree), Some(20));
        assert_eq!(children(&tree), (Some(10), Some(30)));

        let root = tree.root.as_ref().unwrap();
        assert_eq!(root.height, 2);
        assert_eq!(root.left.as_ref().unwrap().height, 1);
        assert_eq!(root.right.as_ref().unwrap().height, 1);
    }

    #[test]
    fn test_left_left_case() {
        //     10 ->   5
        //    /       / \
        //   5       1   10
        //  /
        // 1
        let mut tree = AvlTree::new();
        for key in [10, 5, 1] {
            tree.insert(key);
        }
        tree.check_consistency();
        assert_eq!(root_key(&tree), Some(5));
        assert_eq!(children(&tree), (Some(1), Some(10)));
        assert_eq!(tree.tree_height(), 2);
    }

    #[test]
    fn test_left_right_case() {
        //   3  ->   2
        //  /       / \
        // 1       1   3
        //  \
        //   2
        let mut tree = AvlTree::new();
        for key in [3, 1, 2] {
            tree.insert(key);
        }
        tree.check_consistency();
        assert_eq!(root_key(&tree), Some(2));
        assert_eq!(children(&tree), (Some(1), Some(3)));
    }

    #[test]
    fn test_right_left_case() {
        // 1   ->  2
        //  \     / \
        //   3   1   3
        //  /
        // 2
        let mut tree = AvlTree::new();
        for key in [1, 3, 2] {
            tree.insert(key);
        }
        tree.check_consistency();
        assert_eq!(root_key(&tree), Some(2));
        assert_eq!(children(&tree), (Some(1), Some(3)));
    }

    #[test]
    fn test_rebalance_on_delete() {
        {
            //     3   ->     3 ->   2
            //    / \        /      / \
            //   2   4      2      1   3
            //  /          /
            // 1          1
            let mut tree = AvlTree::new();
            for key in [3, 2, 4, 1] {
                tree.insert(key);
            }
            assert_eq!(tree.tree_height(), 3);
            assert!(tree.delete(&4));
            tree.check_consistency();
            assert_eq!(root_key(&tree), Some(2));
            assert_eq!(tree.tree_height(), 2);
        }
        {
            //   3   ->   3  ->   2
            //  / \      /       / \
            // 1   4    1       1   3
            //  \        \
            //   2        2
            let mut tree = AvlTree::new();
            for key in [3, 1, 4, 2] {
                tree.insert(key);
            }
            assert!(tree.delete(&4));
            tree.check_consistency();
            assert_eq!(root_key(&tree), Some(2));
            assert_eq!(children(&tree), (Some(1), Some(3)));
        }
        {
            //   1     -> 1     ->    2
            //  / \        \         / \
            // 0   2        2       1   3
            //      \        \
            //       3        3
            let mut tree = AvlTree::new();
            for key in [1, 0, 2, 3] {
                tree.insert(key);
            }
            assert!(tree.delete(&0));
            tree.check_consistency();
            assert_eq!(root_key(&tree), Some(2));
            assert_eq!(tree.tree_height(), 2);
        }
        {
            //   1   ->  1   ->  2
            //  / \       \     / \
            // 0   3       3   1   3
            //    /       /
            //   2       2
            let mut tree = AvlTree::new();
            for key in [1, 0, 3, 2] {
                tree.insert(key);
            }
            assert!(tree.delete(&0));
            tree.check_consistency();
            assert_eq!(root_key(&tree), Some(2));
            assert_eq!(children(&tree), (Some(1), Some(3)));
        }
    }

    #[test]
    fn test_delete_root_with_two_children() {
        //     20   ->    30
        //    /  \       /  \
        //   10  30     10  40
        //  /     \    /
        // 5      40  5
        let mut tree = AvlTree::new();
        for key in [20, 10, 30, 5, 40] {
            tree.insert(key);
        }
        assert!(tree.delete(&20));
        tree.check_consistency();
        assert_eq!(root_key(&tree), Some(30));
        assert_eq!(tree.inorder_traversal(), vec![5, 10, 30, 40]);
    }

    #[test]
    fn test_delete_rebalances_several_levels() {
        // Removing 12 unbalances 11 first and, once that subtree shrinks, the root.
        let mut tree = AvlTree::new();
        for key in [8, 5, 11, 3, 7, 10, 12, 2, 4, 6, 9, 1] {
            tree.insert(key);
        }
        tree.check_consistency();
        assert!(tree.delete(&12));
        tree.check_consistency();
        assert!(tree.is_balanced());
        assert_eq!(tree.inorder_traversal(), (1..=11).collect::<Vec<_>>());
    }

    #[test]
    fn test_duplicate_insert_keeps_shape() {
        let mut tree: AvlTree<i32> = (1..=10).collect();
        let before = tree.clone();
        assert!(!tree.insert(4));
        assert_eq!(root_key(&tree), root_key(&before));
        assert_eq!(tree.tree_height(), before.tree_height());
        assert_eq!(tree.inorder_traversal(), before.inorder_traversal());
    }

    #[test]
    fn test_traverse_level_order() {
        let tree: AvlTree<i32> = (1..=6).collect();
        let mut levels = Vec::new();
        tree.traverse_level_order(|key| levels.push(*key));
        assert_eq!(levels, vec![4, 2, 5, 1, 3, 6]);
    }
}
