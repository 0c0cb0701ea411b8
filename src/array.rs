use std::fmt;
use std::mem;

use crate::error::SparseArrayError;
use crate::iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use crate::key::SparseKey;
use crate::search::{binary_search, Search};
use crate::tracing_helpers::{debug_log, trace_log, warn_log};

// =============================================================================
// Configuration
// =============================================================================

/// Capacity used by [`SparseArray::new`] and for a zero capacity hint.
pub const DEFAULT_CAPACITY: usize = 8;

/// Capacity multiplier applied when a full array grows.
const GROWTH_FACTOR: usize = 2;

#[inline]
fn effective_capacity(hint: usize) -> usize {
    if hint == 0 {
        DEFAULT_CAPACITY
    } else {
        hint
    }
}

/// Capacity after one doubling of `capacity`.
#[inline]
fn grown_capacity(capacity: usize) -> Result<usize, SparseArrayError> {
    capacity
        .checked_mul(GROWTH_FACTOR)
        .ok_or(SparseArrayError::CapacityOverflow { capacity })
}

fn alloc_slots<T>(capacity: usize) -> Result<Vec<T>, SparseArrayError> {
    Ok(Vec::with_capacity(capacity))
}

fn try_alloc_slots<T>(capacity: usize) -> Result<Vec<T>, SparseArrayError> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(capacity)?;
    Ok(slots)
}

// =============================================================================
// Slot
// =============================================================================

/// One physical slot. `value == None` marks a tombstone; the key is kept so
/// the slots stay sorted for binary search.
#[derive(Clone)]
pub(crate) struct Slot<K, V> {
    pub(crate) key: K,
    pub(crate) value: Option<V>,
}

impl<K, V> Slot<K, V> {
    #[inline]
    fn live(key: K, value: V) -> Self {
        Self {
            key,
            value: Some(value),
        }
    }

    #[inline]
    pub(crate) fn is_tombstone(&self) -> bool {
        self.value.is_none()
    }
}

// =============================================================================
// SparseArray
// =============================================================================

/// A sorted map from small signed integer keys to values, stored as one
/// contiguous array.
///
/// Lookups binary-search the array. Removal only tombstones the slot, so it is
/// O(log n) and never shifts; tombstones are reclaimed in batches by
/// [`compact`](Self::compact), which runs on demand before growth and from
/// [`size`](Self::size), [`take`](Self::take) and [`swap`](Self::swap).
///
/// The array owns every `V` it holds. Store owned values (`Box<T>`, `String`)
/// to have them dropped on overwrite, removal, [`clear`](Self::clear) and drop;
/// store references or copyable handles when the caller manages lifetimes.
/// [`insert`](Self::insert) and [`remove`](Self::remove) hand the displaced
/// value back instead of dropping it.
pub struct SparseArray<V, K = i32> {
    /// Physical slots, live and tombstoned, sorted by key. `len()` is the
    /// number of slots in use.
    slots: Vec<Slot<K, V>>,
    /// Slot budget before the next doubling. `slots` has at least this much
    /// room allocated.
    capacity: usize,
    /// Tombstones among `slots`.
    tombstones: usize,
}

impl<V, K: SparseKey> SparseArray<V, K> {
    /// Creates an empty array with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty array with room for `capacity` slots. A hint of zero
    /// selects [`DEFAULT_CAPACITY`].
    ///
    /// # Panics
    ///
    /// Panics if the allocation size overflows, like [`Vec::with_capacity`].
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = effective_capacity(capacity);
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            tombstones: 0,
        }
    }

    /// Fallible [`with_capacity`](Self::with_capacity).
    pub fn try_with_capacity(capacity: usize) -> Result<Self, SparseArrayError> {
        let capacity = effective_capacity(capacity);
        Ok(Self {
            slots: try_alloc_slots(capacity)?,
            capacity,
            tombstones: 0,
        })
    }

    /// Number of live entries. O(1); tombstones are not compacted.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len() - self.tombstones
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of live entries, compacting first if any tombstones are pending.
    ///
    /// This is O(n) when the array is dirty and O(1) otherwise. Afterwards
    /// [`slot_count`](Self::slot_count) equals the returned value. Use
    /// [`len`](Self::len) for the same count without compaction.
    pub fn size(&mut self) -> usize {
        if self.has_garbage() {
            self.compact();
        }
        self.slots.len()
    }

    /// Current slot budget. Reaching it with no tombstones to reclaim doubles it.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Physical slots in use, live and tombstoned.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Removed slots not yet compacted away.
    #[inline]
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Whether any tombstones await compaction.
    #[inline]
    pub fn has_garbage(&self) -> bool {
        self.tombstones != 0
    }

    /// Bytes held by the slot buffer.
    pub fn memory_usage(&self) -> usize {
        self.slots.capacity() * mem::size_of::<Slot<K, V>>()
    }

    /// Locates `key` among the physical slots.
    ///
    /// `Found` may name a tombstone; use [`get`](Self::get) for live lookups.
    #[inline]
    pub fn search(&self, key: K) -> Search {
        Search::from_raw(binary_search(self.slots.len(), key, |i| self.slots[i].key))
    }

    #[inline]
    fn live_index(&self, key: K) -> Option<usize> {
        let index = self.search(key).found()?;
        (!self.slots[index].is_tombstone()).then_some(index)
    }

    /// Value stored under `key`. Never compacts.
    pub fn get(&self, key: K) -> Option<&V> {
        let index = self.live_index(key)?;
        self.slots[index].value.as_ref()
    }

    /// Mutable access to the value stored under `key`.
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        let index = self.live_index(key)?;
        self.slots[index].value.as_mut()
    }

    /// Key and value stored under `key`.
    pub fn get_key_value(&self, key: K) -> Option<(K, &V)> {
        let index = self.live_index(key)?;
        let slot = &self.slots[index];
        slot.value.as_ref().map(|value| (slot.key, value))
    }

    /// Whether `key` holds a live value.
    pub fn contains_key(&self, key: K) -> bool {
        self.live_index(key).is_some()
    }

    /// Smallest live entry.
    pub fn first_key_value(&self) -> Option<(K, &V)> {
        self.iter().next()
    }

    /// Largest live entry.
    pub fn last_key_value(&self) -> Option<(K, &V)> {
        self.iter().next_back()
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    ///
    /// An existing live key is overwritten in place. A tombstone holding the
    /// same key, or sitting exactly at the insertion point, is reused without
    /// shifting. Otherwise the entry is shifted in; when the array is full it
    /// is compacted if that frees a slot, and grown to twice its capacity if
    /// not.
    ///
    /// # Panics
    ///
    /// Panics if the capacity overflows. See [`try_insert`](Self::try_insert).
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.insert_with(key, value, alloc_slots) {
            Ok(old) => old,
            Err(err) => panic!("{err}"),
        }
    }

    /// Like [`insert`](Self::insert), but reports allocation failure instead of
    /// panicking. On error the entries are unchanged and `value` is dropped.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>, SparseArrayError> {
        self.insert_with(key, value, try_alloc_slots).map_err(|err| {
            warn_log!(key = ?key, capacity = self.capacity, error = %err, "sparse array growth failed");
            err
        })
    }

    fn insert_with(
        &mut self,
        key: K,
        value: V,
        alloc: impl FnOnce(usize) -> Result<Vec<Slot<K, V>>, SparseArrayError>,
    ) -> Result<Option<V>, SparseArrayError> {
        let mut index = match self.search(key) {
            Search::Found(index) => {
                let old = self.slots[index].value.replace(value);
                if old.is_none() {
                    self.tombstones -= 1;
                    trace_log!(key = ?key, index, "resurrected tombstone");
                }
                return Ok(old);
            }
            Search::NotFound(index) => index,
        };

        // The predecessor key is below `key` and the tombstone's key above it,
        // so the slot can take the new key without breaking the order.
        if index < self.slots.len() && self.slots[index].is_tombstone() {
            self.slots[index] = Slot::live(key, value);
            self.tombstones -= 1;
            trace_log!(key = ?key, index, "reused tombstone at insertion point");
            return Ok(None);
        }

        if self.has_garbage() && self.slots.len() >= self.capacity {
            self.compact();
            index = self.search(key).index();
        }

        if self.slots.len() < self.capacity {
            self.slots.insert(index, Slot::live(key, value));
            return Ok(None);
        }

        let old_capacity = self.capacity;
        let new_capacity = grown_capacity(old_capacity)?;
        let mut grown = alloc(new_capacity)?;
        grown.extend(self.slots.drain(..index));
        grown.push(Slot::live(key, value));
        grown.append(&mut self.slots);

        self.slots = grown;
        self.capacity = new_capacity;
        debug_log!(old_capacity, new_capacity, limit = self.slots.len(), "sparse array grew");
        Ok(None)
    }

    /// Removes `key`, returning its value. The slot becomes a tombstone; nothing
    /// shifts. Removing an absent or already removed key does nothing.
    pub fn remove(&mut self, key: K) -> Option<V> {
        let index = self.search(key).found()?;
        let old = self.slots[index].value.take()?;
        self.tombstones += 1;
        Some(old)
    }

    /// Tombstones every entry for which `f` returns `false`. No compaction.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(K, &mut V) -> bool,
    {
        for slot in &mut self.slots {
            let keep = match slot.value.as_mut() {
                Some(value) => f(slot.key, value),
                None => continue,
            };
            if !keep {
                slot.value = None;
                self.tombstones += 1;
            }
        }
    }

    /// Drops every value and empties the array. Capacity is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.tombstones = 0;
    }

    /// Squeezes out all tombstones in one left-to-right pass, returning how
    /// many were reclaimed. Live entries keep their relative order and the
    /// buffer is not reallocated.
    pub fn compact(&mut self) -> usize {
        if !self.has_garbage() {
            return 0;
        }

        let reclaimed = self.tombstones;
        self.slots.retain(|slot| !slot.is_tombstone());
        self.tombstones = 0;
        debug_log!(reclaimed, limit = self.slots.len(), "sparse array compacted");
        reclaimed
    }

    /// Compacts, then lowers the capacity to the live count (at least one).
    pub fn shrink_to_fit(&mut self) {
        self.compact();
        let target = self.slots.len().max(1);
        self.slots.shrink_to(target);
        self.capacity = target;
    }

    /// Moves the contents out, leaving `self` empty with [`DEFAULT_CAPACITY`].
    ///
    /// `self` is compacted first, so the returned array carries no tombstones.
    pub fn take(&mut self) -> Self {
        self.compact();
        mem::replace(self, Self::new())
    }

    /// Replaces the contents of `self` with those of `src`, leaving `src`
    /// empty as by [`take`](Self::take). The previous contents of `self` are
    /// dropped.
    pub fn move_from(&mut self, src: &mut Self) {
        *self = src.take();
    }

    /// Compacts both arrays and exchanges their contents. Only the buffer
    /// handles move; no entries are copied.
    pub fn swap(&mut self, other: &mut Self) {
        self.compact();
        other.compact();
        mem::swap(self, other);
    }

    /// Live entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, V, K> {
        Iter::new(&self.slots, self.len())
    }

    /// Live entries in ascending key order, with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, V, K> {
        let len = self.len();
        IterMut::new(&mut self.slots, len)
    }

    /// Live keys, ascending.
    pub fn keys(&self) -> Keys<'_, V, K> {
        Keys { inner: self.iter() }
    }

    /// Live values in key order.
    pub fn values(&self) -> Values<'_, V, K> {
        Values { inner: self.iter() }
    }

    /// Live values in key order, mutably.
    pub fn values_mut(&mut self) -> ValuesMut<'_, V, K> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }
}

impl<V: Clone, K: SparseKey> Clone for SparseArray<V, K> {
    /// The clone gets a buffer of the full slot budget, not just the slots in
    /// use, so it grows on the same schedule as the original.
    fn clone(&self) -> Self {
        let mut slots = Vec::with_capacity(self.capacity);
        slots.extend(self.slots.iter().cloned());
        Self {
            slots,
            capacity: self.capacity,
            tombstones: self.tombstones,
        }
    }
}

impl<V, K: SparseKey> Default for SparseArray<V, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug, K: SparseKey> fmt::Debug for SparseArray<V, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: PartialEq, K: SparseKey> PartialEq for SparseArray<V, K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<V: Eq, K: SparseKey> Eq for SparseArray<V, K> {}

impl<V, K: SparseKey> Extend<(K, V)> for SparseArray<V, K> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V, K: SparseKey> FromIterator<(K, V)> for SparseArray<V, K> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut array = Self::with_capacity(iter.size_hint().0);
        array.extend(iter);
        array
    }
}

impl<V, K: SparseKey> IntoIterator for SparseArray<V, K> {
    type Item = (K, V);
    type IntoIter = IntoIter<V, K>;

    fn into_iter(self) -> Self::IntoIter {
        let len = self.len();
        IntoIter::new(self.slots, len)
    }
}

impl<'a, V, K: SparseKey> IntoIterator for &'a SparseArray<V, K> {
    type Item = (K, &'a V);
    type IntoIter = Iter<'a, V, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V, K: SparseKey> IntoIterator for &'a mut SparseArray<V, K> {
    type Item = (K, &'a mut V);
    type IntoIter = IterMut<'a, V, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}


#[cfg(test)]
mod proptests;
