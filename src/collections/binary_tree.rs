use std::collections::VecDeque;

/// An unbalanced binary tree filled in level order.
///
/// Values are not ordered and may repeat. Insertion takes the first vacant
/// child position in breadth-first order, deletion moves the deepest value
/// into the deleted position, so the tree is always complete: the node at
/// breadth-first position `i` has its children at `2i + 1` and `2i + 2`.
///
/// ```
/// use balanced_set::collections::LevelOrderTree;
/// let mut tree: LevelOrderTree<i32> = (1..=6).collect();
/// assert_eq!(tree.level_order(), vec![&1, &2, &3, &4, &5, &6]);
/// assert_eq!(tree.in_order(), vec![&4, &2, &5, &1, &6, &3]);
/// tree.delete(&2);
/// assert_eq!(tree.level_order(), vec![&1, &6, &3, &4, &5]);
/// ```
#[derive(Clone, Debug)]
pub struct LevelOrderTree<T> {
    root: Link<T>,
    len: usize,
}

#[derive(Clone, Debug)]
struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

type Link<T> = Option<Box<Node<T>>>;

impl<T> LevelOrderTree<T> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Inserts a value at the first vacant position in level order.
    pub fn insert(&mut self, value: T) {
        let slot = Self::slot_at(&mut self.root, &path_to(self.len));
        *slot = Some(Box::new(Node {
            value,
            left: None,
            right: None,
        }));
        self.len += 1;
    }

    /// Deletes the last value equal to `value` in level order by overwriting it
    /// with the deepest value and removing the deepest node.
    /// Returns whether a value was deleted.
    pub fn delete(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let Some(position) = self.level_order().iter().rposition(|v| *v == value) else {
            return false;
        };

        let last = self.len - 1;
        let Some(deepest) = Self::slot_at(&mut self.root, &path_to(last)).take() else {
            return false;
        };
        self.len -= 1;
        if position != last {
            if let Some(node) = Self::slot_at(&mut self.root, &path_to(position)) {
                node.value = deepest.value;
            }
        }
        true
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn max_depth(&self) -> usize {
        fn depth<T>(link: &Link<T>) -> usize {
            match link {
                None => 0,
                Some(node) => 1 + depth(&node.left).max(depth(&node.right)),
            }
        }
        depth(&self.root)
    }

    /// Left subtree, node, right subtree.
    pub fn in_order(&self) -> Vec<&T> {
        fn visit<'a, T>(link: &'a Link<T>, out: &mut Vec<&'a T>) {
            if let Some(node) = link {
                visit(&node.left, out);
                out.push(&node.value);
                visit(&node.right, out);
            }
        }
        let mut out = Vec::with_capacity(self.len);
        visit(&self.root, &mut out);
        out
    }

    /// Node, left subtree, right subtree.
    pub fn pre_order(&self) -> Vec<&T> {
        fn visit<'a, T>(link: &'a Link<T>, out: &mut Vec<&'a T>) {
            if let Some(node) = link {
                out.push(&node.value);
                visit(&node.left, out);
                visit(&node.right, out);
            }
        }
        let mut out = Vec::with_capacity(self.len);
        visit(&self.root, &mut out);
        out
    }

    /// Left subtree, right subtree, node.
    pub fn post_order(&self) -> Vec<&T> {
        fn visit<'a, T>(link: &'a Link<T>, out: &mut Vec<&'a T>) {
            if let Some(node) = link {
                visit(&node.left, out);
                visit(&node.right, out);
                out.push(&node.value);
            }
        }
        let mut out = Vec::with_capacity(self.len);
        visit(&self.root, &mut out);
        out
    }

    /// Pre-order traversal driven by an explicit stack instead of recursion.
    pub fn iterative_pre_order(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            out.push(&node.value);
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
        out
    }

    /// Breadth-first traversal.
    pub fn level_order(&self) -> Vec<&T> {
        self.levels().into_iter().flatten().collect()
    }

    /// Breadth-first traversal, one `Vec` per depth.
    pub fn levels(&self) -> Vec<Vec<&T>> {
        let mut levels = Vec::new();
        let mut queue: VecDeque<&Node<T>> = self.root.as_deref().into_iter().collect();
        while !queue.is_empty() {
            let mut level = Vec::with_capacity(queue.len());
            for _ in 0..queue.len() {
                let Some(node) = queue.pop_front() else {
                    break;
                };
                level.push(&node.value);
                queue.extend(node.left.as_deref());
                queue.extend(node.right.as_deref());
            }
            levels.push(level);
        }
        levels
    }

    /// Follows `path` (false = left, true = right) from `slot` and returns the
    /// link found there, stopping early at an absent node.
    fn slot_at<'a>(slot: &'a mut Link<T>, path: &[bool]) -> &'a mut Link<T> {
        match (path.split_first(), slot) {
            (Some((&go_right, rest)), Some(node)) => {
                let child = if go_right {
                    &mut node.right
                } else {
                    &mut node.left
                };
                Self::slot_at(child, rest)
            }
            (_, slot) => slot,
        }
    }
}

/// Child directions from the root to breadth-first `position` in a complete
/// tree: the bits of `position + 1` below its leading one.
fn path_to(position: usize) -> Vec<bool> {
    let index = position + 1;
    let depth = usize::BITS - 1 - index.leading_zeros();
    (0..depth).rev().map(|bit| (index >> bit) & 1 == 1).collect()
}

impl<T> Default for LevelOrderTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for LevelOrderTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        for value in iter {
            tree.insert(value);
        }
        tree
    }
}
