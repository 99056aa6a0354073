use crate::error::{Error, Result};

/// A fixed-size array whose accessors report out-of-range indices as errors.
///
/// ```
/// use balanced_set::collections::FixedArray;
/// let mut array = FixedArray::<i32>::new(3);
/// array.set(1, 7).unwrap();
/// assert_eq!(array.get(1), Ok(&7));
/// assert!(array.get(3).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedArray<T> {
    items: Box<[T]>,
}

impl<T: Default> FixedArray<T> {
    /// Creates an array of `len` default values.
    pub fn new(len: usize) -> Self {
        Self {
            items: (0..len).map(|_| T::default()).collect(),
        }
    }
}

impl<T> FixedArray<T> {
    /// Creates an array holding the given values; its length is fixed from now on.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            items: items.into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        let len = self.len();
        self.items
            .get(index)
            .ok_or(Error::IndexOutOfBounds { index, len })
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
        *slot = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::FixedArray;
    use crate::Error;

    #[test]
    fn test_get_set() {
        let mut array = FixedArray::<String>::new(4);
        assert_eq!(array.len(), 4);
        assert_eq!(array.get(0), Ok(&String::new()));

        array.set(3, "last".to_string()).unwrap();
        assert_eq!(array.get(3).map(String::as_str), Ok("last"));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut array = FixedArray::from_vec(vec![1, 2, 3]);
        assert_eq!(
            array.get(3),
            Err(Error::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(
            array.set(10, 0),
            Err(Error::IndexOutOfBounds { index: 10, len: 3 })
        );
        assert_eq!(array, FixedArray::from_vec(vec![1, 2, 3]));

        let empty = FixedArray::<u8>::new(0);
        assert!(empty.is_empty());
        assert!(empty.get(0).is_err());
    }
}
