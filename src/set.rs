/// The ordered-set contract shared by [`AvlTree`](crate::AvlTree) and
/// [`RbTree`](crate::RbTree).
///
/// Keys are unique. Inserting a key that is already present and deleting a key
/// that is absent both leave the set unchanged.
pub trait OrderedSet<K: Ord> {
    /// Returns true if the set contains the key.
    fn search(&self, key: &K) -> bool;

    /// Inserts a key into the set.
    /// Returns whether the key was newly inserted.
    fn insert(&mut self, key: K) -> bool;

    /// Removes a key from the set.
    /// Returns whether the key was previously in the set.
    fn delete(&mut self, key: &K) -> bool;

    /// Returns the number of keys in the set.
    fn len(&self) -> usize;

    /// Returns true if the set contains no keys.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns true if every key is strictly greater than its predecessor.
#[cfg(any(test, feature = "consistency_check"))]
pub(crate) fn is_strictly_ascending<'a, K, I>(keys: I) -> bool
where
    K: Ord + 'a,
    I: IntoIterator<Item = &'a K>,
{
    let mut keys = keys.into_iter();
    let Some(mut prev) = keys.next() else {
        return true;
    };
    for key in keys {
        if key <= prev {
            return false;
        }
        prev = key;
    }
    true
}
