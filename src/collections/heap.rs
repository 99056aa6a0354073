use crate::error::{Error, Result};

/// A binary min-heap stored in a `Vec`.
///
/// ```
/// use balanced_set::collections::MinHeap;
/// let mut heap: MinHeap<i32> = [5, 1, 4].into_iter().collect();
/// heap.insert(2);
/// assert_eq!(heap.peek_min(), Ok(&1));
/// assert_eq!(heap.extract_min(), Ok(1));
/// assert_eq!(heap.extract_min(), Ok(2));
/// ```
#[derive(Clone, Debug)]
pub struct MinHeap<T> {
    items: Vec<T>,
}

impl<T: Ord> MinHeap<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Builds a heap from arbitrary values, sifting down from the last inner node.
    pub fn from_vec(items: Vec<T>) -> Self {
        let mut heap = Self { items };
        for index in (0..heap.items.len() / 2).rev() {
            heap.sift_down(index);
        }
        heap
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn insert(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Removes and returns the smallest item.
    pub fn extract_min(&mut self) -> Result<T> {
        if self.items.is_empty() {
            return Err(Error::Empty("heap"));
        }
        let min = self.items.swap_remove(0);
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    /// Returns the smallest item without removing it.
    pub fn peek_min(&self) -> Result<&T> {
        self.items.first().ok_or(Error::Empty("heap"))
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.items[index] >= self.items[parent] {
                break;
            }
            self.items.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;
            if left < self.items.len() && self.items[left] < self.items[smallest] {
                smallest = left;
            }
            if right < self.items.len() && self.items[right] < self.items[smallest] {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.items.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for MinHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::MinHeap;
    use crate::Error;

    #[test]
    fn test_empty() {
        let mut heap = MinHeap::<i32>::new();
        assert!(heap.is_empty());
        assert_eq!(heap.peek_min(), Err(Error::Empty("heap")));
        assert_eq!(heap.extract_min(), Err(Error::Empty("heap")));

        heap.insert(3);
        assert_eq!(heap.extract_min(), Ok(3));
        assert!(heap.extract_min().is_err());
    }

    #[test]
    fn test_extract_sorted() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut values: Vec<i32> = (0..1_000).map(|_| rng.gen_range(-500..500)).collect();

        let mut heap = MinHeap::new();
        for value in &values {
            heap.insert(*value);
        }
        assert_eq!(heap.len(), values.len());

        values.sort();
        for value in &values {
            assert_eq!(heap.peek_min(), Ok(value));
            assert_eq!(heap.extract_min(), Ok(*value));
        }
        assert!(heap.is_empty());
    }

    #[test]
    fn test_from_vec() {
        let mut heap = MinHeap::from_vec(vec![9, 4, 7, 1, 8, 2]);
        assert_eq!(heap.peek_min(), Ok(&1));
        let drained: Vec<i32> = std::iter::from_fn(|| heap.extract_min().ok()).collect();
        assert_eq!(drained, vec![1, 2, 4, 7, 8, 9]);
    }
}
