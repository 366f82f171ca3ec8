//! Element-wise application.
//!
//! The ancestor API drove these through a single variadic option set
//! (safe/unsafe/incr/reuse); here the ownership-distinct modes are separate
//! methods, with `incr` selecting read-modify-write over write-assign.

use crate::access::coords::calc_strides;
use crate::access::AccessPattern;
use crate::error::{Result, TensorError};
use crate::scalar::Scalar;

use super::iter::FlatIterator;
use super::Tensor;

impl<'a, T: Scalar> Tensor<'a, T> {
    /// Apply `f` element-wise into a fresh tensor; the source is untouched.
    ///
    /// Contiguous owners map the backing buffer directly. Views walk their
    /// access pattern and compact into a fresh row-major buffer carrying
    /// the source shape.
    pub fn apply<F: FnMut(T) -> T>(&self, mut f: F) -> Result<Tensor<'static, T>> {
        let res: Vec<T> = if self.is_view() {
            FlatIterator::new(&self.ap)
                .map(|offset| f(self.data()[offset]))
                .collect()
        } else {
            self.data().iter().map(|&v| f(v)).collect()
        };

        let ap = AccessPattern::new(self.shape().to_vec(), calc_strides(self.shape()));
        Ok(Tensor::from_raw(ap, res))
    }

    /// Apply `f` element-wise, writing back into this tensor's buffer.
    /// With `incr`, accumulate instead: `x += f(x)`.
    pub fn apply_inplace<F: FnMut(T) -> T>(&mut self, mut f: F, incr: bool) -> Result<()> {
        if self.is_view() {
            let mut it = FlatIterator::new(&self.ap);
            loop {
                let offset = match it.next_offset() {
                    Ok(offset) => offset,
                    Err(e) if e.is_noop() => break,
                    Err(e) => return Err(e),
                };
                let data = self.data_mut();
                if incr {
                    let add = f(data[offset]);
                    data[offset] += add;
                } else {
                    data[offset] = f(data[offset]);
                }
            }
            return Ok(());
        }

        for x in self.data_mut() {
            if incr {
                let add = f(*x);
                *x += add;
            } else {
                *x = f(*x);
            }
        }
        Ok(())
    }

    /// Apply `f` element-wise into `reuse`'s buffer and hand it back,
    /// reshaped to this tensor's shape. With `incr`, accumulate into the
    /// existing contents.
    ///
    /// Fails with `ShapeMismatch` when the reuse buffer does not hold
    /// exactly `self.size()` elements. A view source is not supported with
    /// a reuse target: the view's offsets address its window, not the
    /// logical element order the reuse buffer is laid out in.
    pub fn apply_into<F: FnMut(T) -> T>(
        &self,
        mut f: F,
        mut reuse: Tensor<'static, T>,
        incr: bool,
    ) -> Result<Tensor<'static, T>> {
        if reuse.data_size() != self.size() {
            return Err(TensorError::ShapeMismatch {
                expected: self.size(),
                got: reuse.data_size(),
            });
        }
        if self.is_view() {
            return Err(TensorError::NotYetImplemented(
                "apply with a reuse target on a view",
            ));
        }

        for (out, &v) in reuse.data_mut().iter_mut().zip(self.data().iter()) {
            if incr {
                *out += f(v);
            } else {
                *out = f(v);
            }
        }

        reuse.reshape(self.shape())?;
        Ok(reuse)
    }
}
