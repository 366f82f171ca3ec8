//! Coordinate algebra: the bijection between N-dimensional coordinates and
//! linear buffer offsets.
//!
//! Everything here is shape-level arithmetic on `usize` slices; no tensor
//! data is touched.

use crate::error::{Result, TensorError};

/// Total number of elements described by a shape. The empty product is 1,
/// so a scalar (empty shape) has size 1.
pub fn total_size(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Row-major strides for a shape.
///
/// Scalars carry no strides. Vectors, including rank-2 row and column
/// vectors, collapse to the single stride `[1]`; only genuinely
/// multi-dimensional shapes get the full `stride_i = ∏_{j>i} d_j` vector.
pub fn calc_strides(shape: &[usize]) -> Vec<usize> {
    if shape.is_empty() {
        return Vec::new();
    }
    if is_vector_shape(shape) {
        return vec![1];
    }

    let mut strides = vec![0usize; shape.len()];
    let mut acc = 1;
    for i in (0..shape.len()).rev() {
        strides[i] = acc;
        acc *= shape[i];
    }
    strides
}

/// Row-major strides at full rank, one entry per axis even for vectors.
/// The transpose engine and `itol` need the uncollapsed form.
pub(crate) fn calc_strides_full(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![0usize; shape.len()];
    let mut acc = 1;
    for i in (0..shape.len()).rev() {
        strides[i] = acc;
        acc *= shape[i];
    }
    strides
}

/// Rank 1, or rank 2 with a 1 in one of the axes.
pub(crate) fn is_vector_shape(shape: &[usize]) -> bool {
    match shape.len() {
        1 => true,
        2 => shape[0] == 1 || shape[1] == 1,
        _ => false,
    }
}

/// Linear offset of a coordinate: `Σ coords[i] · strides[i]`.
///
/// The stride vector may be vector-collapsed (shorter than the shape), in
/// which case the missing strides are 1. Fails with `IndexError` when the
/// arity differs from the rank or a coordinate is out of range.
pub fn ltoi(shape: &[usize], strides: &[usize], coords: &[usize]) -> Result<usize> {
    if coords.len() != shape.len() {
        return Err(TensorError::IndexError {
            axis: shape.len(),
            index: coords.len(),
            size: shape.len(),
        });
    }

    let mut at = 0;
    for (i, &coord) in coords.iter().enumerate() {
        if coord >= shape[i] {
            return Err(TensorError::IndexError {
                axis: i,
                index: coord,
                size: shape[i],
            });
        }
        let stride = strides.get(i).copied().unwrap_or(1);
        at += coord * stride;
    }
    Ok(at)
}

/// Coordinates of a linear offset; the inverse of [`ltoi`] for contiguous
/// row-major layouts.
///
/// Fails with `IndexError` when `i` is at or beyond the total size.
pub fn itol(i: usize, shape: &[usize], strides: &[usize]) -> Result<Vec<usize>> {
    let size = total_size(shape);
    if i >= size {
        return Err(TensorError::IndexError {
            axis: 0,
            index: i,
            size,
        });
    }

    // Vector-collapsed strides cannot be divided through; recover the
    // full-rank row-major form first.
    let full;
    let strides = if strides.len() < shape.len() {
        full = calc_strides_full(shape);
        &full[..]
    } else {
        strides
    };

    let mut rem = i;
    let mut coords = Vec::with_capacity(shape.len());
    for (d, &stride) in strides.iter().enumerate() {
        let coord = rem / stride;
        rem %= stride;
        if coord >= shape[d] {
            return Err(TensorError::IndexError {
                axis: d,
                index: coord,
                size: shape[d],
            });
        }
        coords.push(coord);
    }
    Ok(coords)
}

/// Reorder `xs` under a permutation pattern: `out[i] = xs[pat[i]]`.
///
/// Fails with `DimMismatch` on arity and `IndexError` when `pat` is not a
/// bijection of `0..xs.len()`.
pub fn permute<X: Copy>(pat: &[usize], xs: &[X]) -> Result<Vec<X>> {
    if pat.len() != xs.len() {
        return Err(TensorError::DimMismatch {
            rank: xs.len(),
            got: pat.len(),
        });
    }

    let mut seen = vec![false; xs.len()];
    for &axis in pat {
        if axis >= xs.len() || seen[axis] {
            return Err(TensorError::IndexError {
                axis,
                index: axis,
                size: xs.len(),
            });
        }
        seen[axis] = true;
    }

    Ok(pat.iter().map(|&axis| xs[axis]).collect())
}
