//! Element repetition along an axis.

use crate::access::coords::total_size;
use crate::access::slice::Axis;
use crate::error::{Result, TensorError};
use crate::scalar::Scalar;

use super::{ConsOpt, Tensor};

impl<T: Scalar> Tensor<'_, T> {
    /// Repeat each slab along `axis`, NumPy-style: `repeats[j]` copies of
    /// slab `j`. A single repeat value broadcasts across the whole axis.
    /// [`Axis::All`] flattens first and repeats every element.
    ///
    /// The result is an independent tensor; the source is untouched.
    ///
    /// # Panics
    ///
    /// Panics when `axis` names a non-existent axis (beyond the rank, or
    /// past 1 on a vector); that is a caller bug, not a data condition.
    pub fn repeat(&self, axis: Axis, repeats: &[usize]) -> Result<Tensor<'static, T>> {
        let mut new_shape: Vec<usize>;
        let size: usize;
        let axis = match axis {
            Axis::All => {
                size = self.size();
                new_shape = vec![size];
                0
            }
            Axis::Index(axis) if self.is_scalar() => {
                size = 1;
                // A scalar repeated along axis 1 becomes a row vector; the
                // placeholder slot is overwritten with the summed repeats.
                new_shape = if axis == 1 { vec![1, 0] } else { vec![0] };
                axis
            }
            Axis::Index(1)
                if self.is_vector() && !self.is_row_vec() && !self.is_col_vec() =>
            {
                // A vanilla vector repeated along axis 1 acts as a column.
                size = 1;
                new_shape = self.shape().to_vec();
                new_shape.push(1);
                1
            }
            Axis::Index(axis) => {
                size = self.shape()[axis];
                new_shape = self.shape().to_vec();
                axis
            }
        };

        let broadcast;
        let repeats = if repeats.len() == 1 {
            broadcast = vec![repeats[0]; size];
            &broadcast[..]
        } else {
            repeats
        };
        if repeats.len() != size {
            return Err(TensorError::ShapeMismatch {
                expected: size,
                got: repeats.len(),
            });
        }

        new_shape[axis] = repeats.iter().sum();
        let mut ret = Tensor::new([ConsOpt::Shape(new_shape.clone())]);

        let outers = if self.is_scalar() {
            1
        } else {
            match total_size(&self.shape()[..axis]) {
                0 => 1,
                n => n,
            }
        };

        // CalcStrides collapses vectors to [1], so both the source and a
        // vector-shaped result step one element at a time.
        let new_is_vector = crate::access::coords::is_vector_shape(&new_shape);
        let stride = if new_is_vector || self.is_vector() {
            1
        } else {
            self.ostrides()[axis]
        };
        let new_stride = if new_is_vector {
            1
        } else {
            ret.strides()[axis]
        };

        let src = self.data();
        let mut dest_start = 0;
        let mut src_start = 0;
        for _ in 0..outers {
            for &rep in repeats.iter().take(size) {
                for _ in 0..rep {
                    if src_start >= src.len() || dest_start + stride > ret.data_size() {
                        break;
                    }
                    let run = stride.min(src.len() - src_start);
                    ret.data_mut()[dest_start..dest_start + run]
                        .copy_from_slice(&src[src_start..src_start + run]);
                    dest_start += new_stride;
                }
                src_start += stride;
            }
        }

        Ok(ret)
    }
}

#[cfg(test)]
mod tests {
    use crate::access::slice::Axis;
    use crate::tensor::{ConsOpt, Tensor};
    use crate::TensorError;

    fn tensor(data: Vec<i32>, shape: &[usize]) -> Tensor<'static, i32> {
        Tensor::new([ConsOpt::Backing(data), ConsOpt::Shape(shape.to_vec())])
    }

    #[test]
    fn test_repeat_matrix_axis1() {
        // [[1,2],[3,4]] with repeats (2,1) along the columns.
        let t = tensor(vec![1, 2, 3, 4], &[2, 2]);
        let r = t.repeat(Axis::Index(1), &[2, 1]).unwrap();

        assert_eq!(r.shape(), &[2, 3]);
        assert_eq!(r.data(), &[1, 1, 2, 3, 3, 4]);
    }

    #[test]
    fn test_repeat_matrix_axis0() {
        let t = tensor(vec![1, 2, 3, 4], &[2, 2]);
        let r = t.repeat(Axis::Index(0), &[2]).unwrap();

        assert_eq!(r.shape(), &[4, 2]);
        assert_eq!(r.data(), &[1, 2, 1, 2, 3, 4, 3, 4]);
    }

    #[test]
    fn test_repeat_3_tensor_middle_axis() {
        let t = tensor((1..=12).collect(), &[2, 3, 2]);
        let r = t.repeat(Axis::Index(1), &[1, 2, 1]).unwrap();

        assert_eq!(r.shape(), &[2, 4, 2]);
        assert_eq!(
            r.data(),
            &[1, 2, 3, 4, 3, 4, 5, 6, 7, 8, 9, 10, 9, 10, 11, 12]
        );
    }

    #[test]
    fn test_repeat_scalar_axis0() {
        let t = Tensor::new([ConsOpt::Scalar(3i32)]);
        let r = t.repeat(Axis::Index(0), &[5]).unwrap();

        assert_eq!(r.shape(), &[5]);
        assert_eq!(r.data(), &[3, 3, 3, 3, 3]);
    }

    #[test]
    fn test_repeat_scalar_axis1_is_row_vec() {
        let t = Tensor::new([ConsOpt::Scalar(7i32)]);
        let r = t.repeat(Axis::Index(1), &[4]).unwrap();

        assert_eq!(r.shape(), &[1, 4]);
        assert_eq!(r.data(), &[7, 7, 7, 7]);
    }

    #[test]
    fn test_repeat_all_axes_flattens() {
        let t = tensor(vec![1, 2, 3, 4], &[2, 2]);
        let r = t.repeat(Axis::All, &[2]).unwrap();

        assert_eq!(r.shape(), &[8]);
        assert_eq!(r.data(), &[1, 1, 2, 2, 3, 3, 4, 4]);
    }

    #[test]
    fn test_repeat_all_axes_once_is_flatten() {
        let t = tensor(vec![1, 2, 3, 4, 5, 6], &[2, 3]);
        let r = t.repeat(Axis::All, &[1]).unwrap();

        assert_eq!(r.shape(), &[6]);
        assert_eq!(r.data(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_repeat_identity_matches_clone_data() {
        let t = tensor((1..=6).collect(), &[2, 3]);
        let r = t.repeat(Axis::Index(0), &[1, 1]).unwrap();

        assert_eq!(r.shape(), t.shape());
        assert_eq!(r.data(), t.data());
    }

    #[test]
    fn test_repeat_vanilla_vector_axis1() {
        // Treated as a column vector: (3,) -> (3, 2).
        let t = tensor(vec![1, 2, 3], &[3]);
        let r = t.repeat(Axis::Index(1), &[2]).unwrap();

        assert_eq!(r.shape(), &[3, 2]);
        assert_eq!(r.data(), &[1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn test_repeat_vector_axis0() {
        let t = tensor(vec![1, 2, 3], &[3]);
        let r = t.repeat(Axis::Index(0), &[2, 1, 3]).unwrap();

        assert_eq!(r.shape(), &[6]);
        assert_eq!(r.data(), &[1, 1, 2, 3, 3, 3]);
    }

    #[test]
    fn test_repeat_bad_broadcast_length() {
        let t = tensor(vec![1, 2, 3, 4], &[2, 2]);
        assert!(matches!(
            t.repeat(Axis::Index(0), &[1, 2, 3]),
            Err(TensorError::ShapeMismatch { expected: 2, got: 3 })
        ));
    }

    #[test]
    #[should_panic]
    fn test_repeat_bad_axis_panics() {
        let t = tensor(vec![1, 2, 3, 4], &[2, 2]);
        let _ = t.repeat(Axis::Index(5), &[1]);
    }
}
