//! # ndtensor
//!
//! Dense, strided, row-major N-dimensional tensors with shared-storage
//! views, thunked transposition and repeat/slice access-pattern machinery.
//!
//! ## Features
//!
//! - **Access patterns**: shape + strides as a first-class value, with the
//!   full coordinate algebra (`ltoi`/`itol`/`permute`) exposed
//! - **Thunked transpose**: `t()` records a permutation without moving
//!   data; `transpose()` materialises it with an in-place cycle-following
//!   permutation
//! - **Mutable views**: `slice()` hands out a window that aliases the
//!   parent's buffer, with the borrow checker pinning lifetimes
//! - **Repeat**: NumPy-style element repetition along one axis or all
//! - **Buffer pool**: owned buffers recycle through a process-wide pool on
//!   drop
//!
//! ## Quick Start
//!
//! ```rust
//! use ndtensor::{srange, ConsOpt, Tensor};
//!
//! let mut t = Tensor::new([
//!     ConsOpt::Backing((0..6i32).collect()),
//!     ConsOpt::Shape(vec![2, 3]),
//! ]);
//! assert_eq!(t.at(&[1, 1]), 4);
//!
//! // Thunk a transpose, then materialise it.
//! t.t(&[]).unwrap();
//! t.transpose();
//! assert_eq!(t.shape(), &[3, 2]);
//! assert_eq!(t.data(), &[0, 3, 1, 4, 2, 5]);
//!
//! // Views alias the parent's buffer.
//! {
//!     let mut row = t.slice(&[srange(0, 1), None]).unwrap();
//!     row.data_mut()[0] = 42;
//! }
//! assert_eq!(t.at(&[0, 0]), 42);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         User API                            │
//! │   Tensor::new(opts) / ones / zeroes                         │
//! │   at, t, transpose, repeat, slice, apply, copy_to           │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Access patterns                        │
//! │   AccessPattern (shape, strides, lock)                      │
//! │   coordinate algebra: ltoi / itol / permute / calc_strides  │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Storage                              │
//! │   Owned Vec<T>  ──borrow/return──  process-wide pool        │
//! │   View &mut [T] ──aliases──  parent's buffer                │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod access;
pub mod error;
pub mod pool;
pub mod scalar;
pub mod tensor;

// Re-exports
pub use access::slice::{sindex, srange, Axis, SliceSpec};
pub use access::{calc_strides, itol, ltoi, permute, total_size, AccessPattern};
pub use error::{Result, TensorError};
pub use scalar::{Complex32, Complex64, Dtype, Scalar};
pub use tensor::{ConsOpt, Tensor};
