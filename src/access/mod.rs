//! Access patterns: how a linear buffer is read as an N-dimensional array.
//!
//! An [`AccessPattern`] is the (shape, strides, locked) triple. It is a pure
//! value: cloning is deep and nothing here touches tensor data. The lock
//! flag is a correctness guard against reshaping a pattern that is supposed
//! to be fixed; it is not a synchronisation primitive.

pub mod coords;
pub mod slice;

use crate::error::{Result, TensorError};

pub use coords::{calc_strides, itol, ltoi, permute, total_size};
pub use slice::{Axis, SliceSpec};

/// Shape, strides and a lock flag describing a row-major layout.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessPattern {
    shape: Vec<usize>,
    strides: Vec<usize>,
    locked: bool,
}

impl AccessPattern {
    /// Pattern with explicit strides, locked.
    pub fn new(shape: Vec<usize>, strides: Vec<usize>) -> Self {
        Self {
            shape,
            strides,
            locked: true,
        }
    }

    /// Scalar pattern: empty shape, no strides, locked.
    pub fn scalar() -> Self {
        Self {
            shape: Vec::new(),
            strides: Vec::new(),
            locked: true,
        }
    }

    // ========================================================================
    // Metadata
    // ========================================================================

    /// Shape of the pattern.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Strides of the pattern. Vectors carry the single stride `[1]`,
    /// scalars none.
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Number of axes in the shape.
    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements addressed by the shape.
    #[inline]
    pub fn total_size(&self) -> usize {
        total_size(&self.shape)
    }

    /// Effective dimensionality: 0 for scalars, 1 for any vector, the rank
    /// otherwise. Row and column vectors count as 1 even though their rank
    /// is 2.
    pub(crate) fn dims(&self) -> usize {
        if self.is_scalar() {
            0
        } else if self.is_vector() {
            1
        } else {
            self.rank()
        }
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    // ========================================================================
    // Shape predicates
    // ========================================================================

    /// Rank 0.
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    /// Rank 1, or rank 2 with a 1 in one of the axes.
    #[inline]
    pub fn is_vector(&self) -> bool {
        coords::is_vector_shape(&self.shape)
    }

    /// Shape `(1, n)`.
    #[inline]
    pub fn is_row_vec(&self) -> bool {
        self.shape.len() == 2 && self.shape[0] == 1
    }

    /// Shape `(n, 1)`.
    #[inline]
    pub fn is_col_vec(&self) -> bool {
        self.shape.len() == 2 && self.shape[1] == 1
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Replace the shape and recompute row-major strides. Empty dims make
    /// the pattern a scalar. Fails on a locked pattern.
    pub fn set_shape(&mut self, dims: &[usize]) -> Result<()> {
        if self.locked {
            return Err(TensorError::Locked);
        }
        self.shape = dims.to_vec();
        self.strides = calc_strides(&self.shape);
        Ok(())
    }

    // ========================================================================
    // Transposition
    // ========================================================================

    /// The pattern this one becomes under an axis permutation, along with
    /// the normalised permutation.
    ///
    /// Empty `axes` means reverse all axes. The identity permutation is
    /// reported as `NoOp`; invalid permutations (wrong arity, out-of-range
    /// or repeated entries) fail without producing a pattern.
    pub fn transposed(&self, axes: &[usize]) -> Result<(AccessPattern, Vec<usize>)> {
        let rank = self.rank();

        let axes: Vec<usize> = if axes.is_empty() {
            (0..rank).rev().collect()
        } else {
            axes.to_vec()
        };

        if axes.len() != rank {
            return Err(TensorError::DimMismatch {
                rank,
                got: axes.len(),
            });
        }
        let mut seen = vec![false; rank];
        for &axis in &axes {
            if axis >= rank || seen[axis] {
                return Err(TensorError::IndexError {
                    axis,
                    index: axis,
                    size: rank,
                });
            }
            seen[axis] = true;
        }

        if axes.iter().enumerate().all(|(i, &axis)| i == axis) {
            return Err(TensorError::NoOp);
        }

        // Rank-2 vectors keep their single stride; only the shape entries
        // swap. Everything else permutes shape and strides together.
        let transform = if self.is_vector() && rank == 2 {
            AccessPattern::new(vec![self.shape[1], self.shape[0]], vec![1])
        } else {
            let shape = axes.iter().map(|&axis| self.shape[axis]).collect();
            let strides = axes.iter().map(|&axis| self.strides[axis]).collect();
            AccessPattern::new(shape, strides)
        };

        Ok((transform, axes))
    }
}

impl PartialEq for AccessPattern {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.strides == other.strides
    }
}
