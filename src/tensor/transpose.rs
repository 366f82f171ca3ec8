//! Thunked and materialised transposition.
//!
//! [`Tensor::t`] records a permutation without touching data; downstream
//! code that understands strides can consume the permutation directly.
//! [`Tensor::transpose`] physically permutes the buffer with an in-place
//! cycle-following walk, a rank-generalised version of the classic in-place
//! matrix transposition scheme.

use crate::access::coords::{calc_strides_full, itol};
use crate::error::{Result, TensorError};
use crate::scalar::Scalar;

use super::Tensor;

impl<T: Scalar> Tensor<'_, T> {
    /// Thunked transpose: reorder the axes under `axes` without moving
    /// data. Empty `axes` reverses all axes (the classic transpose for
    /// matrices).
    ///
    /// An identity permutation is swallowed. When a thunk is already
    /// pending, a vector un-thunks outright, an exact reversal cancels the
    /// pending thunk, and anything else forces materialisation first.
    ///
    /// Fails on an invalid permutation without mutating state.
    pub fn t(&mut self, axes: &[usize]) -> Result<()> {
        let (transform, axes) = match self.ap.transposed(axes) {
            Ok(pair) => pair,
            Err(TensorError::NoOp) => return Ok(()),
            Err(e) => return Err(e),
        };

        // Pending transposes of rank >= 3 are permutations of the physical
        // strides; a new one can only stack on top of materialised data.
        if let Some(old) = self.old.take() {
            if self.is_vector() || transform.shape() == old.shape() {
                // A vector transpose is pure shape bookkeeping, and an
                // exact reversal cancels: restore the backup either way.
                self.ap = old;
                self.transpose_with = None;
                return Ok(());
            }
            self.old = Some(old);
            self.transpose();

            // The transform above described the pre-materialisation
            // strides; rebuild it against the settled layout.
            let (transform, axes) = self
                .ap
                .transposed(&axes)
                .expect("axes validated above and not the identity");
            self.old = Some(std::mem::replace(&mut self.ap, transform));
            self.transpose_with = Some(axes);
            return Ok(());
        }

        self.old = Some(std::mem::replace(&mut self.ap, transform));
        self.transpose_with = Some(axes);
        Ok(())
    }

    /// Materialise a pending transpose: permute the buffer in place so it
    /// is row-major contiguous for the current shape, then clear the thunk
    /// state. No-op when nothing is pending or the tensor is a scalar.
    pub fn transpose(&mut self) {
        if self.old.is_none() || self.is_scalar() {
            return;
        }
        let (old, axes) = match (self.old.take(), self.transpose_with.take()) {
            (Some(old), Some(axes)) => (old, axes),
            _ => return,
        };

        let exp_shape = self.ap.shape().to_vec();

        if self.is_vector() {
            // Strides stay [1]; only the recorded shape changes.
            self.set_shape_in_place(&exp_shape);
            return;
        }

        // Strides of the post-transpose layout; the recorded ones describe
        // the permuted view of the old buffer, not the destination.
        let exp_strides = calc_strides_full(&exp_shape);
        let size = self.size();

        // Sizes below 3 have nothing to move: the first and last positions
        // are fixed points of every axis permutation.
        if size > 2 {
            // Track which positions hold their final element; the fixed
            // endpoints are seeded as already placed.
            let mut track = vec![false; size];
            track[0] = true;
            track[size - 1] = true;
            let mut remaining = size - 2;

            let data = self.data_mut();

            let mut saved = T::zero();
            let mut i = 1;
            while remaining > 0 {
                let dest = transpose_index(i, &old, &axes, &exp_strides);

                if track[i] && track[dest] {
                    // Cycle closed: deposit the carried value and scan for
                    // the start of the next cycle.
                    data[i] = saved;
                    saved = T::zero();
                    while i < size && track[i] {
                        i += 1;
                    }
                    if i >= size {
                        break;
                    }
                    continue;
                }

                track[i] = true;
                remaining -= 1;
                let tmp = data[i];
                data[i] = saved;
                saved = tmp;
                i = dest;
            }
            if i < size {
                data[i] = saved;
            }
        }

        self.set_shape_in_place(&exp_shape);
        debug_assert!(self.sanity().is_ok());
    }
}

/// Physical destination of the element at linear position `i` of the old
/// layout: fold of coordinate recovery, axis permutation and re-linearising
/// against the destination strides.
fn transpose_index(
    i: usize,
    old: &crate::access::AccessPattern,
    axes: &[usize],
    exp_strides: &[usize],
) -> usize {
    let old_coord = itol(i, old.shape(), old.strides())
        .expect("walk positions stay below the total size");

    // The conceptual form is permute(axes, old_coord) followed by ltoi
    // against the destination shape; folding the two skips the checks.
    axes.iter()
        .zip(exp_strides.iter())
        .map(|(&axis, &stride)| old_coord[axis] * stride)
        .sum()
}
