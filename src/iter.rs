//! Iterators over the live entries of a [`SparseArray`](crate::SparseArray),
//! in ascending key order. Tombstones are skipped.

use std::iter::FusedIterator;
use std::slice;
use std::vec;

use crate::array::Slot;

pub struct Iter<'a, V, K = i32> {
    slots: slice::Iter<'a, Slot<K, V>>,
    /// Live entries not yet yielded.
    remaining: usize,
}

impl<'a, V, K> Iter<'a, V, K> {
    pub(crate) fn new(slots: &'a [Slot<K, V>], live: usize) -> Self {
        Self {
            slots: slots.iter(),
            remaining: live,
        }
    }
}

impl<'a, V, K: Copy> Iterator for Iter<'a, V, K> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Some(ref value) = slot.value {
                self.remaining -= 1;
                return Some((slot.key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, V, K: Copy> DoubleEndedIterator for Iter<'a, V, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.next_back() {
            if let Some(ref value) = slot.value {
                self.remaining -= 1;
                return Some((slot.key, value));
            }
        }
        None
    }
}

impl<V, K: Copy> ExactSizeIterator for Iter<'_, V, K> {}

impl<V, K: Copy> FusedIterator for Iter<'_, V, K> {}

impl<V, K> Clone for Iter<'_, V, K> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

pub struct IterMut<'a, V, K = i32> {
    slots: slice::IterMut<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, V, K> IterMut<'a, V, K> {
    pub(crate) fn new(slots: &'a mut [Slot<K, V>], live: usize) -> Self {
        Self {
            slots: slots.iter_mut(),
            remaining: live,
        }
    }
}

impl<'a, V, K: Copy> Iterator for IterMut<'a, V, K> {
    type Item = (K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Some(ref mut value) = slot.value {
                self.remaining -= 1;
                return Some((slot.key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, V, K: Copy> DoubleEndedIterator for IterMut<'a, V, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.next_back() {
            if let Some(ref mut value) = slot.value {
                self.remaining -= 1;
                return Some((slot.key, value));
            }
        }
        None
    }
}

impl<V, K: Copy> ExactSizeIterator for IterMut<'_, V, K> {}

impl<V, K: Copy> FusedIterator for IterMut<'_, V, K> {}

/// Owning iterator; tombstoned slots are discarded as it advances.
pub struct IntoIter<V, K = i32> {
    slots: vec::IntoIter<Slot<K, V>>,
    remaining: usize,
}

impl<V, K> IntoIter<V, K> {
    pub(crate) fn new(slots: Vec<Slot<K, V>>, live: usize) -> Self {
        Self {
            slots: slots.into_iter(),
            remaining: live,
        }
    }
}

impl<V, K> Iterator for IntoIter<V, K> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Some(value) = slot.value {
                self.remaining -= 1;
                return Some((slot.key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V, K> DoubleEndedIterator for IntoIter<V, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.next_back() {
            if let Some(value) = slot.value {
                self.remaining -= 1;
                return Some((slot.key, value));
            }
        }
        None
    }
}

impl<V, K> ExactSizeIterator for IntoIter<V, K> {}

impl<V, K> FusedIterator for IntoIter<V, K> {}

pub struct Keys<'a, V, K = i32> {
    pub(crate) inner: Iter<'a, V, K>,
}

impl<V, K: Copy> Iterator for Keys<'_, V, K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V, K: Copy> DoubleEndedIterator for Keys<'_, V, K> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<V, K: Copy> ExactSizeIterator for Keys<'_, V, K> {}

impl<V, K: Copy> FusedIterator for Keys<'_, V, K> {}

pub struct Values<'a, V, K = i32> {
    pub(crate) inner: Iter<'a, V, K>,
}

impl<'a, V, K: Copy> Iterator for Values<'a, V, K> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, V, K: Copy> DoubleEndedIterator for Values<'a, V, K> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<V, K: Copy> ExactSizeIterator for Values<'_, V, K> {}

impl<V, K: Copy> FusedIterator for Values<'_, V, K> {}

pub struct ValuesMut<'a, V, K = i32> {
    pub(crate) inner: IterMut<'a, V, K>,
}

impl<'a, V, K: Copy> Iterator for ValuesMut<'a, V, K> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, V, K: Copy> DoubleEndedIterator for ValuesMut<'a, V, K> {
    fn next_back(&mut self) -> Option<&'a mut V> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<V, K: Copy> ExactSizeIterator for ValuesMut<'_, V, K> {}

impl<V, K: Copy> FusedIterator for ValuesMut<'_, V, K> {}
