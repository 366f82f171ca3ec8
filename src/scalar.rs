//! Scalar element types supported by tensors.

use num_traits::{One, Zero};

// Re-export complex types for convenience
pub use num_complex::{Complex32, Complex64};

/// Marker trait for numeric types that can back a tensor.
///
/// The `Pod` bound lets external serialisers read the buffer as raw bytes
/// via [`Tensor::as_bytes`](crate::Tensor::as_bytes); `Zero`/`One` back the
/// fill constructors.
pub trait Scalar:
    Copy
    + Clone
    + Send
    + Sync
    + Default
    + PartialEq
    + std::fmt::Debug
    + 'static
    + bytemuck::Pod
    + std::ops::AddAssign
    + Zero
    + One
{
    /// Runtime tag identifying the element type.
    fn dtype() -> Dtype;
}

/// Runtime element-type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dtype {
    F32,
    F64,
    I32,
    I64,
    U32,
    U64,
    C64,
    C128,
}

impl Dtype {
    /// Width of one element in bytes.
    pub fn size_of(self) -> usize {
        match self {
            Dtype::F32 | Dtype::I32 | Dtype::U32 => 4,
            Dtype::F64 | Dtype::I64 | Dtype::U64 | Dtype::C64 => 8,
            Dtype::C128 => 16,
        }
    }
}

macro_rules! impl_scalar {
    ($($ty:ty => $tag:ident),* $(,)?) => {
        $(impl Scalar for $ty {
            fn dtype() -> Dtype {
                Dtype::$tag
            }
        })*
    };
}

impl_scalar! {
    f32 => F32,
    f64 => F64,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    Complex32 => C64,
    Complex64 => C128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_tags() {
        assert_eq!(<f32 as Scalar>::dtype(), Dtype::F32);
        assert_eq!(<i64 as Scalar>::dtype(), Dtype::I64);
        assert_eq!(<Complex32 as Scalar>::dtype(), Dtype::C64);
    }

    #[test]
    fn test_dtype_widths() {
        assert_eq!(Dtype::F32.size_of(), 4);
        assert_eq!(Dtype::C128.size_of(), 16);
        assert_eq!(Dtype::U64.size_of(), 8);
    }
}
