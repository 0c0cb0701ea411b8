//! # sparse-array
//!
//! A memory-efficient sorted map for small signed integer keys.
//!
//! Entries live in one contiguous array sorted by key. Lookups are a binary
//! search; removal leaves a tombstone in place instead of shifting, and
//! tombstones are compacted in batches when room is needed. This makes it a
//! compact alternative to `HashMap<i32, V>` or `BTreeMap<i32, V>` for
//! lookup- and insert-heavy workloads with deferred deletions.
//!
//! | Operation                 | Cost                                   |
//! |---------------------------|----------------------------------------|
//! | `get` / `contains_key`    | O(log n)                               |
//! | `remove`                  | O(log n), never shifts                 |
//! | `insert`                  | O(log n) + shift; amortized doubling   |
//! | `len`                     | O(1)                                   |
//! | `size` / `compact`        | O(n) when tombstones are pending       |
//!
//! The container is not synchronized. Wrap it in a lock to share it across
//! threads.
//!
//! ## Example
//!
//! ```rust
//! use sparse_array::SparseArray;
//!
//! let mut arr: SparseArray<&str> = SparseArray::with_capacity(2);
//! arr.insert(5, "a");
//! arr.insert(1, "b");
//! arr.insert(3, "c"); // grows 2 -> 4
//!
//! assert_eq!(arr.size(), 3);
//! assert_eq!(arr.get(1), Some(&"b"));
//!
//! arr.remove(5);
//! assert_eq!(arr.get(5), None);
//! assert_eq!(arr.size(), 2);
//!
//! arr.insert(5, "d");
//! assert_eq!(arr.get(5), Some(&"d"));
//! ```

#![forbid(unsafe_code)]

mod array;
mod error;
mod iter;
mod key;
mod search;
mod tracing_helpers;

pub use array::{SparseArray, DEFAULT_CAPACITY};
pub use error::SparseArrayError;
pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use key::SparseKey;
pub use search::Search;
