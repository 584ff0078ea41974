//! Vector of unconstrained elements.

use std::fmt;
use std::iter::FromIterator;

use super::{Collection, Entries, IntoIter, Iter, Key, algebra};
use crate::element::{Element, Value};
use crate::error::VectorError;

/// An immutable, insertion-ordered, integer-keyed vector.
///
/// Every transforming operation returns a new `Vector` holding its own
/// copy of the entries; see the [module documentation](super) for the
/// in-place exceptions.
///
/// Equality is order-sensitive: two vectors are equal when they hold the
/// same `(key, value)` pairs in the same insertion order.
///
/// # Examples
///
/// ```rust
/// use assoc_vector::vector::{Collection, Vector};
///
/// let vector = Vector::from_pairs([(1, "Foo"), (2, "Baz"), (3, "Bar")]);
///
/// let trimmed = vector.except(&[1, 3]);
/// assert_eq!(trimmed.pairs(), vec![(2, "Baz")]);
///
/// let merged = vector.merge(&Vector::from_values(["Qux"]));
/// assert_eq!(merged.keys(), vec![0, 1, 2, 3]);
/// ```
#[derive(Clone)]
pub struct Vector<V = Value> {
    entries: Entries<V>,
}

impl<V> Vector<V> {
    /// Creates an empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Entries::default(),
        }
    }

    /// Creates a vector that takes ownership of `entries`.
    #[must_use]
    pub const fn from_entries(entries: Entries<V>) -> Self {
        Self { entries }
    }

    /// Creates a vector from `(key, value)` pairs, keeping their order.
    ///
    /// A repeated key keeps its first position and its last value.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Key, V)>) -> Self {
        pairs.into_iter().collect()
    }

    /// Creates a vector keyed `0..n` from `values`.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = V>) -> Self {
        Self::from_entries(algebra::from_values(values))
    }

    /// Consumes the vector and returns its entries.
    #[must_use]
    pub fn into_entries(self) -> Entries<V> {
        self.entries
    }
}

impl<V: Clone> Vector<V> {
    /// Returns the value stored under `key`, or `default`.
    #[must_use]
    pub fn get_or(&self, key: Key, default: V) -> V {
        self.entries.get(&key).cloned().unwrap_or(default)
    }

    /// Returns the first value, or `default` when empty.
    #[must_use]
    pub fn first_value_or(&self, default: V) -> V {
        self.first_value().cloned().unwrap_or(default)
    }

    /// Returns the last value, or `default` when empty.
    #[must_use]
    pub fn last_value_or(&self, default: V) -> V {
        self.last_value().cloned().unwrap_or(default)
    }

    /// Returns a new vector with `key` set to `value`.
    ///
    /// An existing key keeps its position; a new key is appended.
    #[must_use]
    pub fn set(&self, key: Key, value: V) -> Self {
        Self::from_entries(algebra::set(&self.entries, key, value))
    }

    /// Returns a new vector with `function(value, key)` applied to every entry.
    ///
    /// Keys and order are preserved; the element type may change.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use assoc_vector::vector::{Collection, Vector};
    ///
    /// let vector = Vector::from_pairs([(4, 2), (7, 3)]);
    /// let described = vector.map(|value, key| format!("{key}:{value}"));
    /// assert_eq!(described.values(), vec!["4:2".to_string(), "7:3".to_string()]);
    /// ```
    #[must_use]
    pub fn map<W, F>(&self, function: F) -> Vector<W>
    where
        F: FnMut(&V, Key) -> W,
    {
        Vector::from_entries(algebra::map(&self.entries, function))
    }

    /// Returns this vector's values followed by `other`'s values, keyed `0..n`.
    ///
    /// Original keys are discarded.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self::from_entries(algebra::merge(&self.entries, &other.entries))
    }

    /// Returns a new vector where every pair of `pairs` overwrites or adds its key.
    ///
    /// Keys only present in this vector are left untouched. Not recursive.
    #[must_use]
    pub fn replace(&self, pairs: impl IntoIterator<Item = (Key, V)>) -> Self {
        Self::from_entries(algebra::replace(&self.entries, pairs))
    }

    /// [`replace`](Self::replace) with the entries of another vector.
    #[must_use]
    pub fn replace_vector(&self, other: &Self) -> Self {
        self.replace(other.iter().map(|(key, value)| (key, value.clone())))
    }

    /// Returns a new vector with `values` appended after the highest key.
    ///
    /// The first value takes the highest key plus one (zero when empty).
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::InvalidArgument`] if the keys would overflow.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use assoc_vector::vector::{Collection, Vector};
    ///
    /// let vector: Vector<i32> = Vector::new().push([1, 2, 3]).unwrap();
    /// assert_eq!(vector.pairs(), vec![(0, 1), (1, 2), (2, 3)]);
    /// ```
    pub fn push(&self, values: impl IntoIterator<Item = V>) -> Result<Self, VectorError> {
        algebra::push(&self.entries, values).map(Self::from_entries)
    }

    /// Returns a new vector with `values` placed before the existing entries.
    ///
    /// The first value takes the lowest key minus one, the next the lowest
    /// key minus two, and so on; iteration yields them in call order
    /// followed by the original entries. An empty vector is keyed `0..n`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::InvalidArgument`] if the keys would underflow.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use assoc_vector::vector::{Collection, Vector};
    ///
    /// let vector = Vector::from_pairs([(2, 4)]).unshift([2]).unwrap();
    /// assert_eq!(vector.pairs(), vec![(1, 2), (2, 4)]);
    /// ```
    pub fn unshift(&self, values: impl IntoIterator<Item = V>) -> Result<Self, VectorError> {
        algebra::unshift(&self.entries, values).map(Self::from_entries)
    }
}

impl<V: Clone + PartialEq> Vector<V> {
    /// Returns `true` if `needle` is one of the values.
    #[must_use]
    pub fn contains(&self, needle: &V) -> bool {
        self.entries.values().any(|value| value == needle)
    }

    /// Returns the entries whose value does not occur in `values`. Keys are preserved.
    #[must_use]
    pub fn diff(&self, values: &[V]) -> Self {
        Self::from_entries(algebra::by_value(&self.entries, values, false))
    }

    /// Returns the entries whose value does not occur in `other`.
    #[must_use]
    pub fn diff_vector(&self, other: &Self) -> Self {
        self.diff(&other.values())
    }

    /// Returns the entries whose value occurs in `values`. Keys are preserved.
    #[must_use]
    pub fn intersect(&self, values: &[V]) -> Self {
        Self::from_entries(algebra::by_value(&self.entries, values, true))
    }

    /// Returns the entries whose value occurs in `other`.
    #[must_use]
    pub fn intersect_vector(&self, other: &Self) -> Self {
        self.intersect(&other.values())
    }
}

impl<V: Element> Vector<V> {
    /// Returns `true` if a value is loosely equal to `needle`.
    ///
    /// See [`Element::loose_eq`].
    #[must_use]
    pub fn contains_loose(&self, needle: &V) -> bool {
        self.entries.values().any(|value| value.loose_eq(needle))
    }
}

impl<V: Clone> Collection for Vector<V> {
    type Item = V;

    #[inline]
    fn entries(&self) -> &Entries<V> {
        &self.entries
    }

    #[inline]
    fn entries_mut(&mut self) -> &mut Entries<V> {
        &mut self.entries
    }

    #[inline]
    fn with_entries(&self, entries: Entries<V>) -> Self {
        Self::from_entries(entries)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<V> Default for Vector<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(Key, V)> for Vector<V> {
    fn from_iter<I: IntoIterator<Item = (Key, V)>>(iter: I) -> Self {
        Self::from_entries(iter.into_iter().collect())
    }
}

impl<V> From<Vec<V>> for Vector<V> {
    fn from(values: Vec<V>) -> Self {
        Self::from_values(values)
    }
}

impl<V> From<Entries<V>> for Vector<V> {
    fn from(entries: Entries<V>) -> Self {
        Self::from_entries(entries)
    }
}

impl<V> IntoIterator for Vector<V> {
    type Item = (Key, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.entries.into_iter(),
        }
    }
}

impl<'a, V: Clone> IntoIterator for &'a Vector<V> {
    type Item = (Key, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: PartialEq> PartialEq for Vector<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().eq(other.entries.iter())
    }
}

impl<V: fmt::Debug> fmt::Debug for Vector<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<V: fmt::Display> fmt::Display for Vector<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in &self.entries {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde
// =============================================================================

#[cfg(feature = "serde")]
impl<V: serde::Serialize> serde::Serialize for Vector<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct VectorVisitor<V> {
    marker: std::marker::PhantomData<V>,
}

#[cfg(feature = "serde")]
impl<'de, V> serde::de::Visitor<'de> for VectorVisitor<V>
where
    V: serde::Deserialize<'de>,
{
    type Value = Vector<V>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a map with integer keys")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut entries = Entries::default();
        while let Some((key, value)) = access.next_entry::<Key, V>()? {
            entries.insert(key, value);
        }
        Ok(Vector::from_entries(entries))
    }
}

#[cfg(feature = "serde")]
impl<'de, V> serde::Deserialize<'de> for Vector<V>
where
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(VectorVisitor {
            marker: std::marker::PhantomData,
        })
    }
}
