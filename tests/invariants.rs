//! Universal invariants that hold for every valid tensor.

use ndtensor::{calc_strides, itol, ltoi, permute, Axis, ConsOpt, Tensor};

fn range_tensor(n: usize, shape: &[usize]) -> Tensor<'static, i64> {
    let data: Vec<i64> = (0..n as i64).collect();
    Tensor::new([ConsOpt::Backing(data), ConsOpt::Shape(shape.to_vec())])
}

/// Every coordinate of a shape, row-major order.
fn all_coords(shape: &[usize]) -> Vec<Vec<usize>> {
    let mut out = vec![Vec::new()];
    for &dim in shape {
        out = out
            .into_iter()
            .flat_map(|prefix| {
                (0..dim).map(move |c| {
                    let mut next = prefix.clone();
                    next.push(c);
                    next
                })
            })
            .collect();
    }
    out
}

#[test]
fn test_at_agrees_with_ltoi() {
    for shape in [vec![4], vec![2, 3], vec![2, 3, 4], vec![3, 2, 2, 2]] {
        let t = range_tensor(shape.iter().product(), &shape);
        for coords in all_coords(&shape) {
            let at = ltoi(t.shape(), t.strides(), &coords).unwrap();
            assert_eq!(t.at(&coords), t.data()[at]);
        }
    }
}

#[test]
fn test_itol_inverts_ltoi_row_major() {
    for shape in [vec![4], vec![2, 3], vec![2, 3, 4]] {
        let strides = calc_strides(&shape);
        for coords in all_coords(&shape) {
            let i = ltoi(&shape, &strides, &coords).unwrap();
            assert_eq!(itol(i, &shape, &strides).unwrap(), coords);
        }
    }
}

#[test]
fn test_reshape_preserves_total_size() {
    let mut t = range_tensor(24, &[2, 3, 4]);
    t.reshape(&[6, 4]).unwrap();
    assert_eq!(t.size(), 24);
    t.reshape(&[24]).unwrap();
    assert_eq!(t.size(), 24);

    assert!(t.reshape(&[5, 5]).is_err());
    assert_eq!(t.shape(), &[24]);
}

#[test]
fn test_double_t_is_identity() {
    let mut t = range_tensor(24, &[2, 3, 4]);
    let orig = t.clone();

    t.t(&[]).unwrap();
    t.t(&[]).unwrap();

    assert!(!t.is_transpose_pending());
    assert_eq!(t.shape(), orig.shape());
    assert_eq!(t.data(), orig.data());
}

#[test]
fn test_t_then_inverse_t_clears_thunk() {
    // T(axes) followed by T(reverse-permutation) cancels without touching
    // data. For axes (2, 0, 1) the inverse is (1, 2, 0).
    let mut t = range_tensor(24, &[2, 3, 4]);
    let orig = t.clone();

    t.t(&[2, 0, 1]).unwrap();
    t.t(&[1, 2, 0]).unwrap();

    assert!(!t.is_transpose_pending());
    assert_eq!(t.shape(), orig.shape());
    assert_eq!(t.data(), orig.data());
}

#[test]
fn test_materialised_transpose_addressing() {
    // After T(axes); Transpose(), the element at permute(axes, c) of the
    // new layout is the element at c of the old one.
    for axes in [vec![1, 0, 2], vec![2, 0, 1], vec![2, 1, 0], vec![0, 2, 1]] {
        let original = range_tensor(24, &[2, 3, 4]);
        let mut t = original.clone();
        t.t(&axes).unwrap();
        t.transpose();

        let new_strides = calc_strides(t.shape());
        for coords in all_coords(original.shape()) {
            let new_coords = permute(&axes, &coords).unwrap();
            let at = ltoi(t.shape(), &new_strides, &new_coords).unwrap();
            assert_eq!(t.data()[at], original.at(&coords), "axes {axes:?}");
        }
    }
}

#[test]
fn test_clone_eq_and_ownership() {
    let t = range_tensor(12, &[3, 4]);
    let c = t.clone();
    assert_eq!(c, t);
    assert!(!c.is_view());
}

#[test]
fn test_repeat_ones_is_identity() {
    let t = range_tensor(6, &[2, 3]);
    let r = t.repeat(Axis::Index(1), &[1, 1, 1]).unwrap();
    assert_eq!(r, t);
}

#[test]
fn test_repeat_all_axes_once_flattens() {
    let t = range_tensor(6, &[2, 3]);
    let r = t.repeat(Axis::All, &[1]).unwrap();
    assert_eq!(r.shape(), &[6]);
    assert_eq!(r.data(), t.data());
}

#[test]
fn test_scalar_predicates() {
    let s = Tensor::new([ConsOpt::Scalar(2.5f64)]);
    assert!(s.is_scalar());
    assert_eq!(s.rank(), 0);
    assert_eq!(s.size(), 1);
    assert_eq!(s.data_size(), 1);

    let v = range_tensor(4, &[4]);
    assert!(v.is_vector() && !v.is_row_vec() && !v.is_col_vec());

    let rv = range_tensor(4, &[1, 4]);
    assert!(rv.is_vector() && rv.is_row_vec());

    let cv = range_tensor(4, &[4, 1]);
    assert!(cv.is_vector() && cv.is_col_vec());
}
