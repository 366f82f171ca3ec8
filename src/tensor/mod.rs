//! The dense tensor type.
//!
//! A [`Tensor`] owns (or, for views, borrows) a linear row-major buffer and
//! interprets it through an [`AccessPattern`]. Transposition is thunked: a
//! pending permutation is recorded in `old`/`transpose_with` and only
//! materialised on demand, so downstream consumers can work off the
//! permutation directly.
//!
//! Views created by [`Tensor::slice`] alias the parent's buffer through a
//! mutable borrow; writes through either side are observable through the
//! other, and the borrow checker pins the view's lifetime to the parent.

mod apply;
mod iter;
mod repeat;
mod slice;
mod transpose;

use crate::access::coords::{ltoi, total_size};
use crate::access::AccessPattern;
use crate::error::{Result, TensorError};
use crate::pool;
use crate::scalar::{Dtype, Scalar};

/// Backing storage: owned buffer, or a mutable window into a parent's.
enum Buf<'a, T: Scalar> {
    Owned(Vec<T>),
    View(&'a mut [T]),
}

/// A construction option for [`Tensor::new`].
///
/// Options form an order-independent set:
///
/// ```
/// use ndtensor::{ConsOpt, Tensor};
///
/// let t = Tensor::new([
///     ConsOpt::Backing(vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]),
///     ConsOpt::Shape(vec![2, 3]),
/// ]);
/// assert_eq!(t.shape(), &[2, 3]);
/// ```
pub enum ConsOpt<T: Scalar> {
    /// Declare the shape; strides are recomputed row-major.
    Shape(Vec<usize>),
    /// Provide the backing buffer.
    Backing(Vec<T>),
    /// Build a scalar tensor holding one value.
    Scalar(T),
}

/// A dense, strided, row-major N-dimensional array.
pub struct Tensor<'a, T: Scalar> {
    /// Current (logical) access pattern.
    ap: AccessPattern,
    data: Buf<'a, T>,
    /// Physical access pattern backed up when a transpose is thunked.
    old: Option<AccessPattern>,
    /// Permutation turning `old` into `ap`; present iff `old` is.
    transpose_with: Option<Vec<usize>>,
}

impl<T: Scalar> Tensor<'static, T> {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Build a tensor from a set of construction options, then fix up the
    /// missing pieces:
    ///
    /// - backing without shape: a 1-element buffer becomes a scalar,
    ///   anything else a vector of its length;
    /// - shape without backing: a zeroed buffer of the total size;
    ///
    /// and finally lock the pattern and run the sanity check.
    ///
    /// # Panics
    ///
    /// Panics when the options are inconsistent: a backing whose length
    /// disagrees with the declared shape, or no options at all.
    pub fn new(opts: impl IntoIterator<Item = ConsOpt<T>>) -> Self {
        let mut shape: Option<Vec<usize>> = None;
        let mut data: Option<Vec<T>> = None;
        for opt in opts {
            match opt {
                ConsOpt::Shape(dims) => shape = Some(dims),
                ConsOpt::Backing(buf) => data = Some(buf),
                ConsOpt::Scalar(v) => {
                    shape = Some(Vec::new());
                    data = Some(vec![v]);
                }
            }
        }

        let (shape, data) = match (shape, data) {
            (None, Some(d)) => {
                let s = if d.len() == 1 { Vec::new() } else { vec![d.len()] };
                (s, d)
            }
            (Some(s), None) => {
                let d = pool::borrow_buf(total_size(&s));
                (s, d)
            }
            (Some(s), Some(d)) => (s, d),
            (None, None) => (Vec::new(), Vec::new()),
        };

        let mut ap = AccessPattern::default();
        ap.set_shape(&shape)
            .expect("fresh access pattern is unlocked");
        ap.lock();

        let t = Tensor {
            ap,
            data: Buf::Owned(data),
            old: None,
            transpose_with: None,
        };
        if let Err(e) = t.sanity() {
            panic!("tensor construction failed sanity check: {e}");
        }
        t
    }

    /// Tensor of the given shape filled with ones. An empty shape makes a
    /// scalar one.
    pub fn ones(shape: &[usize]) -> Self {
        if shape.is_empty() {
            return Tensor::new([ConsOpt::Scalar(T::one())]);
        }
        let mut data = pool::borrow_buf::<T>(total_size(shape));
        for x in data.iter_mut() {
            *x = T::one();
        }
        Tensor::new([ConsOpt::Backing(data), ConsOpt::Shape(shape.to_vec())])
    }

    /// Tensor of the given shape filled with zeroes.
    pub fn zeroes(shape: &[usize]) -> Self {
        Tensor::new([ConsOpt::Shape(shape.to_vec())])
    }

    pub(crate) fn from_raw(ap: AccessPattern, data: Vec<T>) -> Self {
        Tensor {
            ap,
            data: Buf::Owned(data),
            old: None,
            transpose_with: None,
        }
    }
}

impl<'a, T: Scalar> Tensor<'a, T> {
    pub(crate) fn view_from_raw(ap: AccessPattern, window: &'a mut [T]) -> Self {
        Tensor {
            ap,
            data: Buf::View(window),
            old: None,
            transpose_with: None,
        }
    }

    // ========================================================================
    // Metadata
    // ========================================================================

    /// Shape of the tensor.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.ap.shape()
    }

    /// Strides of the tensor (vector-collapsed form for rank-2 vectors).
    #[inline]
    pub fn strides(&self) -> &[usize] {
        self.ap.strides()
    }

    /// Number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.ap.rank()
    }

    /// Logical element count: the product of the shape.
    #[inline]
    pub fn size(&self) -> usize {
        self.ap.total_size()
    }

    /// Physical length of the backing buffer. Equal to [`Tensor::size`] for
    /// non-view, non-scalar tensors; views may carry a larger window.
    #[inline]
    pub fn data_size(&self) -> usize {
        self.data().len()
    }

    /// Element-type tag.
    #[inline]
    pub fn dtype(&self) -> Dtype {
        T::dtype()
    }

    /// The current access pattern.
    #[inline]
    pub fn access_pattern(&self) -> &AccessPattern {
        &self.ap
    }

    /// Whether this tensor aliases another tensor's buffer.
    #[inline]
    pub fn is_view(&self) -> bool {
        matches!(self.data, Buf::View(_))
    }

    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.ap.is_scalar()
    }

    #[inline]
    pub fn is_vector(&self) -> bool {
        self.ap.is_vector()
    }

    #[inline]
    pub fn is_row_vec(&self) -> bool {
        self.ap.is_row_vec()
    }

    #[inline]
    pub fn is_col_vec(&self) -> bool {
        self.ap.is_col_vec()
    }

    /// Whether a transpose is thunked and not yet materialised.
    #[inline]
    pub fn is_transpose_pending(&self) -> bool {
        self.old.is_some()
    }

    /// Physical shape: the pre-thunk shape while a transpose is pending,
    /// the current shape otherwise.
    pub(crate) fn oshape(&self) -> &[usize] {
        match &self.old {
            Some(old) => old.shape(),
            None => self.ap.shape(),
        }
    }

    /// Physical strides, by the same rule as [`Tensor::oshape`].
    pub(crate) fn ostrides(&self) -> &[usize] {
        match &self.old {
            Some(old) => old.strides(),
            None => self.ap.strides(),
        }
    }

    // ========================================================================
    // Data access
    // ========================================================================

    /// The backing buffer (the aliased window, for views).
    #[inline]
    pub fn data(&self) -> &[T] {
        match &self.data {
            Buf::Owned(v) => v,
            Buf::View(s) => s,
        }
    }

    /// Mutable access to the backing buffer.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        match &mut self.data {
            Buf::Owned(v) => v,
            Buf::View(s) => s,
        }
    }

    /// The buffer as raw bytes, for external serialisers.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.data())
    }

    /// Element at a coordinate.
    ///
    /// # Panics
    ///
    /// Panics when the coordinate arity differs from the rank or a
    /// coordinate is out of range; both are caller bugs.
    pub fn at(&self, coords: &[usize]) -> T {
        if coords.len() != self.rank() {
            panic!(
                "coordinate arity mismatch: {} coordinates for a rank-{} tensor",
                coords.len(),
                self.rank()
            );
        }
        match ltoi(self.shape(), self.strides(), coords) {
            Ok(at) => self.data()[at],
            Err(e) => panic!("invalid coordinates {coords:?}: {e}"),
        }
    }

    /// The value of a scalar tensor.
    ///
    /// # Panics
    ///
    /// Panics when the tensor is not a scalar.
    pub fn scalar_value(&self) -> T {
        if !self.is_scalar() {
            panic!(
                "scalar_value on a tensor of shape {:?}; only scalars carry one",
                self.shape()
            );
        }
        self.data()[0]
    }

    // ========================================================================
    // Shape mutation
    // ========================================================================

    /// Change the shape in place, keeping the data. Fails with
    /// `ShapeMismatch` when the new total size disagrees with the buffer;
    /// failure leaves the tensor untouched.
    pub fn reshape(&mut self, dims: &[usize]) -> Result<()> {
        let size = total_size(dims);
        if !self.is_view() && !dims.is_empty() && self.data().len() != size {
            return Err(TensorError::ShapeMismatch {
                expected: size,
                got: self.data().len(),
            });
        }
        self.set_shape_in_place(dims);
        self.sanity()
    }

    /// Fill the buffer with zeroes.
    pub fn zero(&mut self) {
        for x in self.data_mut() {
            *x = T::zero();
        }
    }

    /// Unlock, replace the shape, relock. Infallible by construction.
    pub(crate) fn set_shape_in_place(&mut self, dims: &[usize]) {
        self.ap.unlock();
        self.ap.set_shape(dims).expect("pattern was just unlocked");
        self.ap.lock();
    }

    /// Internal consistency check: an owner that is not a scalar must have
    /// exactly as much data as its shape declares.
    pub(crate) fn sanity(&self) -> Result<()> {
        if self.ap.shape().is_empty() && self.data().is_empty() {
            return Err(TensorError::EmptyTensor);
        }
        let expected = self.size();
        let got = self.data().len();
        if !self.is_view() && !self.is_scalar() && got != expected {
            return Err(TensorError::ShapeMismatch { expected, got });
        }
        Ok(())
    }

    // ========================================================================
    // Structural copy
    // ========================================================================

    /// Copy elements by linear position into `other`. The metadata of the
    /// destination is untouched, only sizes must agree.
    ///
    /// View-aware copying is not implemented; either side being a view
    /// fails with `NotYetImplemented`. (An aliased self-copy cannot be
    /// expressed here: `&self` and `&mut other` never name the same
    /// tensor.)
    pub fn copy_to(&self, other: &mut Tensor<'_, T>) -> Result<()> {
        if other.size() != self.size() {
            return Err(TensorError::SizeMismatch {
                left: self.size(),
                right: other.size(),
            });
        }

        if !self.is_view() && !other.is_view() {
            let n = self.size();
            other.data_mut()[..n].copy_from_slice(&self.data()[..n]);
            return Ok(());
        }

        Err(TensorError::NotYetImplemented("copy_to on views"))
    }
}

impl<'a, T: Scalar> Tensor<'a, T> {
    /// Deep copy with a detached lifetime. Identical to `clone`, but the
    /// result of copying a view outlives the parent borrow.
    pub fn to_owned(&self) -> Tensor<'static, T> {
        Tensor {
            ap: self.ap.clone(),
            data: Buf::Owned(self.data().to_vec()),
            old: self.old.clone(),
            transpose_with: self.transpose_with.clone(),
        }
    }
}

impl<T: Scalar> Clone for Tensor<'_, T> {
    /// Deep copy: access pattern, pending-transpose state and buffer are
    /// all duplicated. A clone is never a view.
    fn clone(&self) -> Self {
        Tensor {
            ap: self.ap.clone(),
            data: Buf::Owned(self.data().to_vec()),
            old: self.old.clone(),
            transpose_with: self.transpose_with.clone(),
        }
    }
}

impl<'b, T: Scalar> PartialEq<Tensor<'b, T>> for Tensor<'_, T> {
    /// Element-wise equality over the backing buffers plus shape equality.
    fn eq(&self, other: &Tensor<'b, T>) -> bool {
        self.data() == other.data() && self.shape() == other.shape()
    }
}

impl<T: Scalar> Drop for Tensor<'_, T> {
    /// Owned buffers go back to the pool; views return nothing.
    fn drop(&mut self) {
        if let Buf::Owned(v) = &mut self.data {
            pool::return_buf(std::mem::take(v));
        }
    }
}

impl<T: Scalar> std::fmt::Debug for Tensor<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape())
            .field("strides", &self.strides())
            .field("view", &self.is_view())
            .field("pending_transpose", &self.is_transpose_pending())
            .field("data", &self.data())
            .finish()
    }
}
