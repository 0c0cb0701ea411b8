//! Binary search over the slot keys.

use crate::key::SparseKey;

/// Outcome of looking up a key among the physical slots.
///
/// A `Found` index may point at a tombstone: tombstones keep their key so the
/// slots stay sorted, and [`SparseArray::search`](crate::SparseArray::search)
/// reports them like any other slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Search {
    /// The key occupies this slot.
    Found(usize),
    /// The key is absent; inserting it here keeps the slots sorted.
    NotFound(usize),
}

impl Search {
    /// Decode the raw result of [`binary_search`]: non-negative is a hit,
    /// negative is the bitwise complement of the insertion point.
    #[inline]
    pub(crate) fn from_raw(raw: isize) -> Self {
        if raw >= 0 {
            Search::Found(raw as usize)
        } else {
            Search::NotFound(!raw as usize)
        }
    }

    /// Slot index of a hit, `None` on a miss.
    #[inline]
    pub fn found(self) -> Option<usize> {
        match self {
            Search::Found(index) => Some(index),
            Search::NotFound(_) => None,
        }
    }

    /// Index of the hit or the insertion point of the miss.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Search::Found(index) | Search::NotFound(index) => index,
        }
    }
}

/// Ascending binary search of `key` among `len` keys read through `key_at`.
///
/// Returns the matching index, or `!insertion_point` (always negative) on a
/// miss. `len` never exceeds `isize::MAX` because it counts allocated slots,
/// so `lo + hi` cannot overflow.
#[inline]
pub(crate) fn binary_search<K: SparseKey>(len: usize, key: K, key_at: impl Fn(usize) -> K) -> isize {
    let mut lo = 0usize;
    let mut hi = len;

    while lo < hi {
        let mid = (lo + hi) >> 1;
        let mid_key = key_at(mid);

        if mid_key < key {
            lo = mid + 1;
        } else if mid_key > key {
            hi = mid;
        } else {
            return mid as isize;
        }
    }

    !(lo as isize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(keys: &[i32], key: i32) -> Search {
        Search::from_raw(binary_search(keys.len(), key, |i| keys[i]))
    }

    #[test]
    fn test_empty() {
        assert_eq!(search(&[], 7), Search::NotFound(0));
    }

    #[test]
    fn test_hits() {
        let keys = [-40, -3, 0, 9, 12, 1000];
        for (i, &k) in keys.iter().enumerate() {
            assert_eq!(search(&keys, k), Search::Found(i), "key {}", k);
        }
    }

    #[test]
    fn test_insertion_points() {
        let keys = [-40, -3, 0, 9, 12, 1000];
        assert_eq!(search(&keys, i32::MIN), Search::NotFound(0));
        assert_eq!(search(&keys, -41), Search::NotFound(0));
        assert_eq!(search(&keys, -4), Search::NotFound(1));
        assert_eq!(search(&keys, 1), Search::NotFound(3));
        assert_eq!(search(&keys, 999), Search::NotFound(5));
        assert_eq!(search(&keys, i32::MAX), Search::NotFound(6));
    }

    #[test]
    fn test_raw_encoding() {
        let keys = [2, 4, 6];
        assert_eq!(binary_search(keys.len(), 4, |i| keys[i]), 1);
        assert_eq!(binary_search(keys.len(), 1, |i| keys[i]), !0);
        assert_eq!(binary_search(keys.len(), 7, |i| keys[i]), !3);
        assert!(binary_search(keys.len(), 5, |i| keys[i]) < 0);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Search::Found(3).found(), Some(3));
        assert_eq!(Search::NotFound(3).found(), None);
        assert_eq!(Search::Found(3).index(), 3);
        assert_eq!(Search::NotFound(5).index(), 5);
    }
}
