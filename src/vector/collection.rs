//! The shared collection contract and its iterators.

use std::iter::FusedIterator;

use super::{Entries, Key, algebra};
use crate::element::Element;
use crate::error::VectorError;

// =============================================================================
// Collection Trait
// =============================================================================

/// Read access, key-only transformations and in-place removal shared by
/// [`Vector`](super::Vector) and [`TypedVector`](super::TypedVector).
///
/// Implementors supply access to their backing entries and a way to build
/// a sibling instance (same variant, same element type) around a new
/// backing store. Operations that bring new values into the collection
/// (`set`, `push`, `map`, `merge`, ...) are not part of this trait: each
/// variant provides them with its own guards.
///
/// # Examples
///
/// ```rust
/// use assoc_vector::vector::{Collection, Vector};
///
/// fn describe<C: Collection>(collection: &C) -> String {
///     format!("{} entries, first key {:?}", collection.len(), collection.first_key())
/// }
///
/// let vector = Vector::from_pairs([(1, "Foo"), (3, "Baz")]);
/// assert_eq!(describe(&vector), "2 entries, first key Some(1)");
/// ```
pub trait Collection: Sized {
    /// The element type.
    type Item: Clone;

    /// Returns the backing entries.
    fn entries(&self) -> &Entries<Self::Item>;

    /// Returns the backing entries for in-place mutation.
    fn entries_mut(&mut self) -> &mut Entries<Self::Item>;

    /// Builds a new collection of the same variant holding `entries`.
    fn with_entries(&self, entries: Entries<Self::Item>) -> Self;

    /// Returns the value stored under `key`.
    fn get(&self, key: Key) -> Option<&Self::Item> {
        self.entries().get(&key)
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::OffsetNotFound`] if `key` is not present.
    fn at(&self, key: Key) -> Result<&Self::Item, VectorError> {
        self.entries().get(&key).ok_or_else(|| {
            tracing::trace!(key, "offset not found");
            VectorError::OffsetNotFound { key }
        })
    }

    /// Returns `true` if `key` is present.
    fn has(&self, key: Key) -> bool {
        self.entries().contains_key(&key)
    }

    /// Returns the number of entries.
    fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns `true` if there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if there is at least one entry.
    fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Returns the key of the first inserted entry still present.
    fn first_key(&self) -> Option<Key> {
        self.entries().first().map(|(key, _)| *key)
    }

    /// Returns the key of the last inserted entry still present.
    fn last_key(&self) -> Option<Key> {
        self.entries().last().map(|(key, _)| *key)
    }

    /// Returns the value at [`first_key`](Self::first_key).
    fn first_value(&self) -> Option<&Self::Item> {
        self.entries().first().map(|(_, value)| value)
    }

    /// Returns the value at [`last_key`](Self::last_key).
    fn last_value(&self) -> Option<&Self::Item> {
        self.entries().last().map(|(_, value)| value)
    }

    /// Returns a new collection keeping the entries for which
    /// `predicate(value, key)` holds. Keys are preserved.
    fn filter<F>(&self, predicate: F) -> Self
    where
        F: FnMut(&Self::Item, Key) -> bool,
    {
        self.with_entries(algebra::retain_values(self.entries(), predicate))
    }

    /// Returns a new collection keeping the truthy values.
    fn filter_truthy(&self) -> Self
    where
        Self::Item: Element,
    {
        self.filter(|value, _| value.is_truthy())
    }

    /// Returns `true` if the collection is non-empty and every entry
    /// satisfies `predicate`.
    ///
    /// An empty collection yields `false`.
    fn every<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Self::Item, Key) -> bool,
    {
        self.is_not_empty() && self.entries().iter().all(|(key, value)| predicate(value, *key))
    }

    /// Returns `true` if at least one entry satisfies `predicate`.
    fn some<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Self::Item, Key) -> bool,
    {
        self.entries().iter().any(|(key, value)| predicate(value, *key))
    }

    /// Returns a new collection holding exactly `keys`, in the order given.
    ///
    /// Keys missing from this collection are filled with
    /// [`Element::absent`]. Repeated keys keep their first position.
    fn only(&self, keys: &[Key]) -> Self
    where
        Self::Item: Element,
    {
        self.with_entries(algebra::only(self.entries(), keys, <Self::Item as Element>::absent))
    }

    /// Returns a new collection without the entries whose key is in `keys`.
    fn except(&self, keys: &[Key]) -> Self {
        self.with_entries(algebra::by_key(self.entries(), keys, false))
    }

    /// Returns a new collection without the entries whose key is in `keys`.
    ///
    /// Same as [`except`](Self::except); named after the key-diff family.
    fn diff_keys(&self, keys: &[Key]) -> Self {
        self.except(keys)
    }

    /// Returns a new collection without the entries whose key is present in `other`.
    ///
    /// `other` may hold any element type.
    fn diff_vector_keys<C: Collection>(&self, other: &C) -> Self {
        let keys = other.keys();
        self.with_entries(algebra::by_key(self.entries(), &keys, false))
    }

    /// Returns a new collection with only the entries whose key is in `keys`.
    ///
    /// Unlike [`only`](Self::only), missing keys are not added and the
    /// original order is kept.
    fn intersect_keys(&self, keys: &[Key]) -> Self {
        self.with_entries(algebra::by_key(self.entries(), keys, true))
    }

    /// Returns a new collection with only the entries whose key is present in `other`.
    fn intersect_vector_keys<C: Collection>(&self, other: &C) -> Self {
        let keys = other.keys();
        self.with_entries(algebra::by_key(self.entries(), &keys, true))
    }

    /// Removes and returns the first inserted value. Remaining keys are
    /// not renumbered.
    fn shift(&mut self) -> Option<Self::Item> {
        self.entries_mut().shift_remove_index(0).map(|(_, value)| value)
    }

    /// Removes and returns the last inserted value.
    fn pop(&mut self) -> Option<Self::Item> {
        self.entries_mut().pop().map(|(_, value)| value)
    }

    /// Removes every entry in place.
    fn clear(&mut self) {
        self.entries_mut().clear();
    }

    /// Returns a copy of the backing entries.
    fn all(&self) -> Entries<Self::Item> {
        self.entries().clone()
    }

    /// Returns the values in insertion order.
    fn values(&self) -> Vec<Self::Item> {
        self.entries().values().cloned().collect()
    }

    /// Returns the keys in insertion order.
    fn keys(&self) -> Vec<Key> {
        self.entries().keys().copied().collect()
    }

    /// Returns the entries as `(key, value)` pairs in insertion order.
    fn pairs(&self) -> Vec<(Key, Self::Item)> {
        self.entries()
            .iter()
            .map(|(key, value)| (*key, value.clone()))
            .collect()
    }

    /// Returns an iterator over `(key, &value)` in insertion order.
    ///
    /// Every call starts a fresh traversal.
    fn iter(&self) -> Iter<'_, Self::Item> {
        Iter {
            inner: self.entries().iter(),
        }
    }

    /// Returns an independent copy of this collection.
    fn duplicate(&self) -> Self {
        self.with_entries(self.entries().clone())
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// A borrowing iterator over `(key, &value)` pairs in insertion order.
pub struct Iter<'a, V> {
    inner: indexmap::map::Iter<'a, Key, V>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Key, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (*key, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, value)| (*key, value))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

/// An owning iterator over `(key, value)` pairs in insertion order.
pub struct IntoIter<V> {
    pub(super) inner: indexmap::map::IntoIter<Key, V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (Key, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for IntoIter<V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<V> FusedIterator for IntoIter<V> {}
