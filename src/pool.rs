//! Process-wide buffer pool.
//!
//! Tensors return their owned buffers here when dropped and the fill
//! constructors borrow from here, so short-lived intermediates recycle
//! their allocations. The pool is keyed by element type and exact length;
//! borrowed buffers are zeroed before they are handed out, so callers see
//! the same contents as a fresh allocation.
//!
//! Returning a buffer that was never borrowed is fine: it is simply
//! adopted into the free list (or dropped when the list is full).

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::scalar::Scalar;

/// Buffers retained per (type, length) class; anything beyond is dropped.
const MAX_PER_CLASS: usize = 16;

type Bucket<T> = HashMap<usize, Vec<Vec<T>>>;

static POOL: Lazy<Mutex<HashMap<TypeId, Box<dyn Any + Send>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Borrow a zeroed buffer of exactly `len` elements.
pub fn borrow_buf<T: Scalar>(len: usize) -> Vec<T> {
    let mut pool = POOL.lock().unwrap_or_else(|e| e.into_inner());
    let bucket = pool
        .entry(TypeId::of::<T>())
        .or_insert_with(|| Box::new(Bucket::<T>::new()));
    let bucket = bucket
        .downcast_mut::<Bucket<T>>()
        .expect("pool bucket holds the type it is keyed by");

    match bucket.get_mut(&len).and_then(Vec::pop) {
        Some(mut buf) => {
            for x in buf.iter_mut() {
                *x = T::zero();
            }
            buf
        }
        None => vec![T::zero(); len],
    }
}

/// Return a buffer to the pool. Accepts any buffer, including ones that
/// never came from [`borrow_buf`].
pub fn return_buf<T: Scalar>(buf: Vec<T>) {
    if buf.is_empty() {
        return;
    }
    let len = buf.len();

    let mut pool = POOL.lock().unwrap_or_else(|e| e.into_inner());
    let bucket = pool
        .entry(TypeId::of::<T>())
        .or_insert_with(|| Box::new(Bucket::<T>::new()));
    let bucket = bucket
        .downcast_mut::<Bucket<T>>()
        .expect("pool bucket holds the type it is keyed by");

    let class = bucket.entry(len).or_default();
    if class.len() < MAX_PER_CLASS {
        class.push(buf);
    }
}
