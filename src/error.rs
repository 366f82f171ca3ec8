//! Error types for tensor operations.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TensorError>;

/// An error type for tensor operations.
///
/// Recoverable conditions are returned as values; caller bugs (wrong arity
/// in [`at`](crate::Tensor::at), repeating over a non-existent axis, taking
/// the scalar value of a non-scalar) panic instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    /// Backing length disagrees with the declared shape, a reuse target has
    /// the wrong size, or a repeat broadcast does not fit the axis.
    #[error("shape mismatch: expected {expected} elements, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    /// Two tensors that must hold the same number of elements do not.
    #[error("size mismatch: cannot copy between sizes {left} and {right}")]
    SizeMismatch { left: usize, right: usize },

    /// More index descriptors than the tensor has dimensions.
    #[error("dimension mismatch: have {rank} dimensions, got {got}")]
    DimMismatch { rank: usize, got: usize },

    /// A coordinate or slice bound falls outside the axis it indexes.
    #[error("index {index} out of range for axis {axis} of size {size}")]
    IndexError {
        axis: usize,
        index: usize,
        size: usize,
    },

    /// An access pattern exists but neither shape nor data was provided.
    #[error("tensor has neither shape nor backing data")]
    EmptyTensor,

    /// The operation had nothing to do. Informational, not a failure:
    /// identity transposes and exhausted iterators report it, and their
    /// callers swallow it.
    #[error("no-op")]
    NoOp,

    /// The operation is defined but deliberately unimplemented for this
    /// combination of states.
    #[error("not yet implemented: {0}")]
    NotYetImplemented(&'static str),

    /// In-place shape mutation was attempted on a locked access pattern.
    #[error("access pattern is locked")]
    Locked,
}

impl TensorError {
    /// Whether this error is the informational [`TensorError::NoOp`] signal.
    pub fn is_noop(&self) -> bool {
        matches!(self, TensorError::NoOp)
    }
}
