use thiserror::Error;

/// Failures reported by the simple containers in [`collections`](crate::collections).
///
/// The tree engines never fail: inserting a present key or deleting an absent
/// one is a no-op.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("operation invalid on empty {0}")]
    Empty(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
