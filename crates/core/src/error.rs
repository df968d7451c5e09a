//! Domain error model.

use thiserror::Error;

/// Result type used across the building blocks.
pub type DomainResult<T> = Result<T, DomainError>;

/// Error raised by the few fallible operations.
///
/// Equality, hashing and removal are total and never produce one of these;
/// only the copy-into-slice operations of the collections can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A start index pointed past the end of the destination slice.
    #[error("index {index} out of range for destination of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The destination slice does not have room for every element.
    #[error("destination has room for {available} elements, {needed} required")]
    InsufficientCapacity { needed: usize, available: usize },
}

impl DomainError {
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    pub fn insufficient_capacity(needed: usize, available: usize) -> Self {
        Self::InsufficientCapacity { needed, available }
    }
}

/// Check that `count` elements fit into a slice of `len` starting at `index`.
pub fn check_copy_bounds(count: usize, len: usize, index: usize) -> DomainResult<()> {
    if index > len {
        return Err(DomainError::index_out_of_range(index, len));
    }
    let available = len - index;
    if count > available {
        return Err(DomainError::insufficient_capacity(count, available));
    }
    Ok(())
}
