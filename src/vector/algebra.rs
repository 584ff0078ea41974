//! Entry-level algorithms shared by [`Vector`](super::Vector) and
//! [`TypedVector`](super::TypedVector).
//!
//! Every function takes the source entries by reference and returns a
//! freshly built map; none of them mutate their input.

use super::{Entries, EntryHasher, Key};
use crate::error::VectorError;

fn empty<V>(capacity: usize) -> Entries<V> {
    Entries::with_capacity_and_hasher(capacity, EntryHasher::default())
}

pub(super) fn from_values<V>(values: impl IntoIterator<Item = V>) -> Entries<V> {
    (0..).zip(values).collect()
}

pub(super) fn set<V: Clone>(entries: &Entries<V>, key: Key, value: V) -> Entries<V> {
    let mut result = entries.clone();
    result.insert(key, value);
    result
}

pub(super) fn map<V, W, F>(entries: &Entries<V>, mut function: F) -> Entries<W>
where
    F: FnMut(&V, Key) -> W,
{
    let mut result = empty(entries.len());
    for (key, value) in entries {
        result.insert(*key, function(value, *key));
    }
    result
}

/// Concatenates values, discarding keys and re-indexing from zero.
pub(super) fn merge<V: Clone>(entries: &Entries<V>, other: &Entries<V>) -> Entries<V> {
    from_values(entries.values().chain(other.values()).cloned())
}

/// Overwrites or appends every pair of `pairs`; keys only in `entries` stay.
pub(super) fn replace<V: Clone>(
    entries: &Entries<V>,
    pairs: impl IntoIterator<Item = (Key, V)>,
) -> Entries<V> {
    let mut result = entries.clone();
    for (key, value) in pairs {
        result.insert(key, value);
    }
    result
}

pub(super) fn retain_values<V, F>(entries: &Entries<V>, mut predicate: F) -> Entries<V>
where
    V: Clone,
    F: FnMut(&V, Key) -> bool,
{
    entries
        .iter()
        .filter(|(key, value)| predicate(*value, **key))
        .map(|(key, value)| (*key, value.clone()))
        .collect()
}

/// Entries whose value does (`keep_present`) or does not occur in `comparand`.
pub(super) fn by_value<V>(entries: &Entries<V>, comparand: &[V], keep_present: bool) -> Entries<V>
where
    V: Clone + PartialEq,
{
    retain_values(entries, |value, _| comparand.contains(value) == keep_present)
}

/// Entries whose key does (`keep_present`) or does not occur in `keys`.
pub(super) fn by_key<V: Clone>(entries: &Entries<V>, keys: &[Key], keep_present: bool) -> Entries<V> {
    retain_values(entries, |_, key| keys.contains(&key) == keep_present)
}

/// Exactly `keys`, in their order; missing keys hold `absent()`.
pub(super) fn only<V, F>(entries: &Entries<V>, keys: &[Key], absent: F) -> Entries<V>
where
    V: Clone,
    F: Fn() -> V,
{
    let mut result = empty(keys.len());
    for key in keys {
        if !result.contains_key(key) {
            let value = entries.get(key).cloned().unwrap_or_else(&absent);
            result.insert(*key, value);
        }
    }
    result
}

fn overflow(operation: &str) -> VectorError {
    tracing::debug!(operation, "key space exhausted");
    VectorError::invalid_argument(format!("{operation} would overflow the key space"))
}

/// Appends `values` after the highest key (starting at zero when empty).
pub(super) fn push<V: Clone>(
    entries: &Entries<V>,
    values: impl IntoIterator<Item = V>,
) -> Result<Entries<V>, VectorError> {
    let values: Vec<V> = values.into_iter().collect();
    let mut result = entries.clone();
    if values.is_empty() {
        return Ok(result);
    }

    let first = match entries.keys().max() {
        None => 0,
        Some(highest) => highest.checked_add(1).ok_or_else(|| overflow("push"))?,
    };
    let count = Key::try_from(values.len() - 1).map_err(|_| overflow("push"))?;
    first.checked_add(count).ok_or_else(|| overflow("push"))?;

    result.reserve(values.len());
    let mut key = first;
    for value in values {
        result.insert(key, value);
        key = key.saturating_add(1);
    }
    Ok(result)
}

/// Places `values` before the original entries, in call order, with keys
/// counting down from just below the lowest key (`0..n` when empty).
pub(super) fn unshift<V: Clone>(
    entries: &Entries<V>,
    values: impl IntoIterator<Item = V>,
) -> Result<Entries<V>, VectorError> {
    let values: Vec<V> = values.into_iter().collect();
    if values.is_empty() {
        return Ok(entries.clone());
    }
    let Some(lowest) = entries.keys().min().copied() else {
        return Ok(from_values(values));
    };

    let count = Key::try_from(values.len()).map_err(|_| overflow("unshift"))?;
    lowest.checked_sub(count).ok_or_else(|| overflow("unshift"))?;

    let mut result = empty(entries.len() + values.len());
    for (offset, value) in (1..).zip(values) {
        result.insert(lowest - offset, value);
    }
    result.extend(entries.iter().map(|(key, value)| (*key, value.clone())));
    Ok(result)
}
