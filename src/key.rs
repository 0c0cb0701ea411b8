//! Key types accepted by [`SparseArray`](crate::SparseArray).

use std::fmt::Debug;
use std::hash::Hash;

mod private {
    pub trait Sealed {}
}

/// Fixed-width signed integer usable as a sparse array key.
///
/// Implemented for `i8`, `i16`, `i32`, `i64`, `i128` and `isize`. The default
/// key of [`SparseArray`](crate::SparseArray) is `i32`. Pick a wider type only
/// when the key domain really exceeds 32 bits: every slot stores one key, so
/// the key width is paid per entry.
pub trait SparseKey: Copy + Ord + Hash + Debug + private::Sealed {
    /// Smallest representable key.
    const MIN: Self;
    /// Largest representable key.
    const MAX: Self;
}

macro_rules! impl_sparse_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl private::Sealed for $t {}

            impl SparseKey for $t {
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;
            }
        )*
    };
}

impl_sparse_key!(i8, i16, i32, i64, i128, isize);
