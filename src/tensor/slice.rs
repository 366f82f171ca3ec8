//! View creation by slicing.

use crate::access::coords::calc_strides;
use crate::access::slice::SliceSpec;
use crate::access::AccessPattern;
use crate::error::{Result, TensorError};
use crate::scalar::Scalar;

use super::Tensor;

impl<T: Scalar> Tensor<'_, T> {
    /// Slice the tensor, returning a view that aliases this tensor's
    /// buffer. Each spec is one of `None` (the full axis), a single index,
    /// or a half-open range; missing trailing specs mean full axes.
    ///
    /// Writes through the view are visible here, and the borrow keeps this
    /// tensor untouchable while the view lives:
    ///
    /// ```
    /// use ndtensor::{sindex, ConsOpt, Tensor};
    ///
    /// let mut t = Tensor::new([
    ///     ConsOpt::Backing(vec![0i32, 1, 2, 3]),
    ///     ConsOpt::Shape(vec![2, 2]),
    /// ]);
    /// {
    ///     let mut col = t.slice(&[None, sindex(1)]).unwrap();
    ///     col.data_mut()[0] = 9;
    /// }
    /// assert_eq!(t.at(&[0, 1]), 9);
    /// ```
    ///
    /// Fails with `DimMismatch` when given more specs than axes and
    /// `IndexError` when a bound leaves its axis.
    pub fn slice(&mut self, specs: &[Option<SliceSpec>]) -> Result<Tensor<'_, T>> {
        let op_dims = self.shape().len();
        if specs.len() > op_dims {
            return Err(TensorError::DimMismatch {
                rank: op_dims,
                got: specs.len(),
            });
        }

        let dims = self.ap.dims();
        let mut nd_start = 0;
        let mut nd_end = self.data().len();
        let mut new_shape = self.shape().to_vec();

        for i in 0..op_dims {
            let size = self.oshape()[i];
            // Row and column vectors carry a single stride; their dummy
            // axis steps by one.
            let stride = if dims < op_dims && self.is_vector() {
                1
            } else {
                self.ostrides()[i]
            };

            let (start, end) = match specs.get(i).copied().flatten() {
                None => (0, size),
                Some(sl) => (sl.start(), sl.end()),
            };
            if end > size {
                return Err(TensorError::IndexError {
                    axis: i,
                    index: end,
                    size,
                });
            }
            if start > end {
                return Err(TensorError::IndexError {
                    axis: i,
                    index: start,
                    size: end,
                });
            }

            nd_start += start * stride;
            nd_end -= (size - end) * stride;
            new_shape[i] = end - start;
        }

        let new_ap = if nd_end - nd_start == 1 {
            // The window holds a single element: the view is a scalar.
            AccessPattern::scalar()
        } else {
            let mut new_strides = calc_strides(self.oshape());

            // Interior size-1 axes vanish, but only above rank 2. The
            // asymmetry is load-bearing for downstream consumers.
            let mut dims = dims;
            let mut d = 0;
            while d < dims {
                if new_shape[d] == 1 && dims > 2 {
                    new_shape.remove(d);
                    new_strides.remove(d);
                    dims -= 1;
                } else {
                    d += 1;
                }
            }

            if crate::access::coords::is_vector_shape(&new_shape) && new_shape.len() == 2 {
                if new_shape[1] == 1 {
                    new_strides = vec![new_strides[0]];
                } else {
                    new_strides = vec![1];
                }
            }

            AccessPattern::new(new_shape, new_strides)
        };

        let window = &mut self.data_mut()[nd_start..nd_end];
        Ok(Tensor::view_from_raw(new_ap, window))
    }
}

#[cfg(test)]
mod tests {
    use crate::access::slice::{sindex, srange};
    use crate::tensor::{ConsOpt, Tensor};
    use crate::TensorError;

    fn range_tensor(n: usize, shape: &[usize]) -> Tensor<'static, i32> {
        let data: Vec<i32> = (0..n as i32).collect();
        Tensor::new([ConsOpt::Backing(data), ConsOpt::Shape(shape.to_vec())])
    }

    #[test]
    fn test_slice_2x3x4_window() {
        // T[1, 0:2, 1:3] from a (2, 3, 4) tensor.
        let mut t = range_tensor(24, &[2, 3, 4]);
        let view = t.slice(&[sindex(1), srange(0, 2), srange(1, 3)]).unwrap();

        assert_eq!(view.shape(), &[2, 2]);
        assert_eq!(view.strides(), &[4, 1]);
        assert!(view.is_view());
        // The window starts 13 elements into the parent's buffer.
        assert_eq!(view.data()[0], 13);
        assert_eq!(view.at(&[0, 0]), 13);
        assert_eq!(view.at(&[1, 1]), 18);
    }

    #[test]
    fn test_slice_missing_trailing_specs_are_full() {
        let mut t = range_tensor(6, &[2, 3]);
        let view = t.slice(&[sindex(1)]).unwrap();

        assert_eq!(view.shape(), &[1, 3]);
        assert_eq!(view.data(), &[3, 4, 5]);
    }

    #[test]
    fn test_slice_writes_reach_parent() {
        let mut t = range_tensor(4, &[2, 2]);
        {
            let mut col = t.slice(&[None, sindex(1)]).unwrap();
            let n = col.data_mut().len();
            col.data_mut()[n - 1] = 99;
        }
        assert_eq!(t.at(&[1, 1]), 99);
    }

    #[test]
    fn test_slice_to_scalar() {
        let mut t = range_tensor(6, &[2, 3]);
        let view = t.slice(&[sindex(1), sindex(2)]).unwrap();

        assert!(view.is_scalar());
        assert!(view.is_view());
        assert_eq!(view.scalar_value(), 5);
    }

    #[test]
    fn test_slice_too_many_specs() {
        let mut t = range_tensor(6, &[2, 3]);
        assert!(matches!(
            t.slice(&[None, None, None]),
            Err(TensorError::DimMismatch { rank: 2, got: 3 })
        ));
    }

    #[test]
    fn test_slice_out_of_range() {
        let mut t = range_tensor(6, &[2, 3]);
        assert!(matches!(
            t.slice(&[None, srange(0, 4)]),
            Err(TensorError::IndexError { axis: 1, .. })
        ));
    }

    #[test]
    fn test_slice_inverted_range() {
        let mut t = range_tensor(6, &[2, 3]);
        assert!(t.slice(&[None, srange(2, 1)]).is_err());
    }

    #[test]
    fn test_slice_full_is_same_data() {
        let mut t = range_tensor(6, &[2, 3]);
        let view = t.slice(&[None, None]).unwrap();
        assert_eq!(view.shape(), &[2, 3]);
        assert_eq!(view.data(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_slice_col_vec_stride() {
        // T[:, 1:2] of a (3, 3): a column vector keeping the column stride.
        let mut t = range_tensor(9, &[3, 3]);
        let view = t.slice(&[None, srange(1, 2)]).unwrap();

        assert_eq!(view.shape(), &[3, 1]);
        assert_eq!(view.strides(), &[3]);
        assert_eq!(view.at(&[0, 0]), 1);
        assert_eq!(view.at(&[2, 0]), 7);
    }

    #[test]
    fn test_slice_row_vec_stride() {
        let mut t = range_tensor(9, &[3, 3]);
        let view = t.slice(&[srange(1, 2), None]).unwrap();

        assert_eq!(view.shape(), &[1, 3]);
        assert_eq!(view.strides(), &[1]);
        assert_eq!(view.data(), &[3, 4, 5]);
    }

    #[test]
    fn test_slice_drops_interior_unit_dims_above_rank_2() {
        let mut t = range_tensor(24, &[2, 3, 4]);
        let view = t.slice(&[sindex(0), None, None]).unwrap();

        // The leading size-1 axis is dropped for rank > 2...
        assert_eq!(view.shape(), &[3, 4]);
        assert_eq!(view.data().len(), 12);
    }

    #[test]
    fn test_slice_keeps_unit_dims_at_rank_2() {
        // ...but a rank-2 slice keeps its size-1 axis.
        let mut t = range_tensor(6, &[2, 3]);
        let view = t.slice(&[sindex(0), None]).unwrap();
        assert_eq!(view.shape(), &[1, 3]);
    }

    #[test]
    fn test_slice_of_vector() {
        let mut t = range_tensor(5, &[5]);
        let view = t.slice(&[srange(1, 4)]).unwrap();

        assert_eq!(view.shape(), &[3]);
        assert_eq!(view.data(), &[1, 2, 3]);
    }

    #[test]
    fn test_nested_slice() {
        let mut t = range_tensor(24, &[2, 3, 4]);
        let mut view = t.slice(&[sindex(1), None, None]).unwrap();
        assert_eq!(view.shape(), &[3, 4]);

        let inner = view.slice(&[sindex(0), None]).unwrap();
        assert_eq!(inner.shape(), &[1, 4]);
        assert_eq!(inner.data(), &[12, 13, 14, 15]);
    }
}
