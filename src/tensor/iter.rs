//! Row-major offset iteration for views.
//!
//! A view's buffer is a window into its parent, so element traversal has to
//! walk coordinates through the view's access pattern and map each one to a
//! linear offset in the window.

use crate::access::AccessPattern;
use crate::error::{Result, TensorError};

/// Walks every coordinate of an access pattern in row-major order, yielding
/// the linear buffer offset of each.
pub(crate) struct FlatIterator {
    shape: Vec<usize>,
    strides: Vec<usize>,
    coord: Vec<usize>,
    done: bool,
}

impl FlatIterator {
    pub(crate) fn new(ap: &AccessPattern) -> Self {
        let shape = ap.shape().to_vec();
        let done = shape.iter().any(|&d| d == 0);
        // Vector-collapsed strides spread out to one stride per axis.
        let mut strides = ap.strides().to_vec();
        strides.resize(shape.len(), 1);
        FlatIterator {
            coord: vec![0; shape.len()],
            shape,
            strides,
            done,
        }
    }

    /// The next linear offset, or the `NoOp` signal once exhausted.
    /// Callers treat `NoOp` as end-of-iteration, not as a failure.
    pub(crate) fn next_offset(&mut self) -> Result<usize> {
        if self.done {
            return Err(TensorError::NoOp);
        }

        let offset = self
            .coord
            .iter()
            .zip(self.strides.iter())
            .map(|(&c, &s)| c * s)
            .sum();

        // Odometer increment, last axis fastest.
        self.done = true;
        for d in (0..self.shape.len()).rev() {
            self.coord[d] += 1;
            if self.coord[d] < self.shape[d] {
                self.done = false;
                break;
            }
            self.coord[d] = 0;
        }

        Ok(offset)
    }
}

impl Iterator for FlatIterator {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self.next_offset() {
            Ok(offset) => Some(offset),
            Err(e) if e.is_noop() => None,
            Err(_) => None,
        }
    }
}
