//! Vector whose elements are checked against a declared element type.

use std::fmt;

use super::{Collection, Entries, IntoIter, Iter, Key, Vector, algebra};
use crate::element::{ClassRegistry, Element, ElementType, Value};
use crate::error::VectorError;

/// A [`Vector`] of [`Value`]s that all match one declared [`ElementType`].
///
/// Every value crossing the public boundary is checked: construction
/// elements, `set` values, `*_or` defaults, `contains` needles, `push` and
/// `unshift` arguments, `map` results and the comparands of `diff`,
/// `intersect` and `replace`. Vector comparands of `merge`, `diff_vector`,
/// `intersect_vector` and `replace_vector` must declare the same element
/// type. [`Value::Null`] is accepted everywhere as the absence sentinel.
///
/// A failed check returns [`VectorError::TypeMismatch`] before any new
/// vector is built; the receiver is never altered.
///
/// # Examples
///
/// ```rust
/// use assoc_vector::element::{ElementType, Value};
/// use assoc_vector::error::VectorError;
/// use assoc_vector::vector::{Collection, TypedVector};
///
/// let numbers = TypedVector::from_values(ElementType::Integer, [Value::Integer(1)]).unwrap();
///
/// let pushed = numbers.push([Value::Integer(2)]).unwrap();
/// assert_eq!(pushed.values(), vec![Value::Integer(1), Value::Integer(2)]);
///
/// assert!(matches!(
///     numbers.set(0, Value::from("text")),
///     Err(VectorError::TypeMismatch { .. })
/// ));
/// ```
#[derive(Clone)]
pub struct TypedVector {
    element_type: ElementType,
    entries: Entries<Value>,
}

impl TypedVector {
    /// Creates an empty vector of `element_type`.
    #[must_use]
    pub fn empty(element_type: ElementType) -> Self {
        Self {
            element_type,
            entries: Entries::default(),
        }
    }

    /// Creates a vector of `element_type` from `(key, value)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::TypeMismatch`] if any value does not match.
    pub fn new(
        element_type: ElementType,
        pairs: impl IntoIterator<Item = (Key, Value)>,
    ) -> Result<Self, VectorError> {
        let entries: Entries<Value> = pairs.into_iter().collect();
        element_type.check_all(entries.values())?;
        tracing::trace!(element_type = %element_type, len = entries.len(), "typed vector created");
        Ok(Self {
            element_type,
            entries,
        })
    }

    /// Creates a vector of `element_type` keyed `0..n` from `values`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::TypeMismatch`] if any value does not match.
    pub fn from_values(
        element_type: ElementType,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<Self, VectorError> {
        Self::new(element_type, algebra::from_values(values))
    }

    /// Resolves `tag` against `registry` and creates a vector from `pairs`.
    ///
    /// # Errors
    ///
    /// - [`VectorError::InvalidType`] if `tag` does not resolve.
    /// - [`VectorError::TypeMismatch`] if any value does not match.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use assoc_vector::element::{ClassRegistry, Value};
    /// use assoc_vector::error::VectorError;
    /// use assoc_vector::vector::TypedVector;
    ///
    /// let registry = ClassRegistry::new();
    /// let texts = TypedVector::with_tag("string", &registry, [(3, Value::from("a"))]).unwrap();
    /// assert_eq!(texts.element_type().name(), "string");
    ///
    /// assert_eq!(
    ///     TypedVector::with_tag("strin", &registry, []).err(),
    ///     Some(VectorError::InvalidType { tag: "strin".to_string() })
    /// );
    /// ```
    pub fn with_tag(
        tag: &str,
        registry: &ClassRegistry,
        pairs: impl IntoIterator<Item = (Key, Value)>,
    ) -> Result<Self, VectorError> {
        Self::new(ElementType::resolve(tag, registry)?, pairs)
    }

    /// Returns the declared element type.
    #[must_use]
    pub const fn element_type(&self) -> &ElementType {
        &self.element_type
    }

    /// Returns an untyped copy of the entries.
    #[must_use]
    pub fn to_untyped(&self) -> Vector<Value> {
        Vector::from_entries(self.entries.clone())
    }

    /// Consumes the vector and returns its entries as an untyped vector.
    #[must_use]
    pub fn into_untyped(self) -> Vector<Value> {
        Vector::from_entries(self.entries)
    }

    fn derive(&self, entries: Entries<Value>) -> Self {
        Self {
            element_type: self.element_type.clone(),
            entries,
        }
    }

    fn check_same_type(&self, other: &Self) -> Result<(), VectorError> {
        if self.element_type == other.element_type {
            Ok(())
        } else {
            tracing::debug!(
                expected = self.element_type.name(),
                found = other.element_type.name(),
                "vector of another element type rejected"
            );
            Err(VectorError::TypeMismatch {
                expected: format!("vector of {}", self.element_type),
                found: format!("vector of {}", other.element_type),
            })
        }
    }

    /// Returns the value stored under `key`, or `default`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::TypeMismatch`] if `default` does not match,
    /// even when `key` is present.
    pub fn get_or(&self, key: Key, default: Value) -> Result<Value, VectorError> {
        self.element_type.check(&default)?;
        Ok(self.entries.get(&key).cloned().unwrap_or(default))
    }

    /// Returns the first value, or `default` when empty.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::TypeMismatch`] if `default` does not match.
    pub fn first_value_or(&self, default: Value) -> Result<Value, VectorError> {
        self.element_type.check(&default)?;
        Ok(self.first_value().cloned().unwrap_or(default))
    }

    /// Returns the last value, or `default` when empty.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::TypeMismatch`] if `default` does not match.
    pub fn last_value_or(&self, default: Value) -> Result<Value, VectorError> {
        self.element_type.check(&default)?;
        Ok(self.last_value().cloned().unwrap_or(default))
    }

    /// Returns a new vector with `key` set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::TypeMismatch`] if `value` does not match.
    pub fn set(&self, key: Key, value: Value) -> Result<Self, VectorError> {
        self.element_type.check(&value)?;
        Ok(self.derive(algebra::set(&self.entries, key, value)))
    }

    /// Returns `true` if `needle` is one of the values (strict equality).
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::TypeMismatch`] if `needle` does not match.
    pub fn contains(&self, needle: &Value) -> Result<bool, VectorError> {
        self.element_type.check(needle)?;
        Ok(self.entries.values().any(|value| value == needle))
    }

    /// Returns `true` if a value is loosely equal to `needle`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::TypeMismatch`] if `needle` does not match.
    pub fn contains_loose(&self, needle: &Value) -> Result<bool, VectorError> {
        self.element_type.check(needle)?;
        Ok(self.entries.values().any(|value| value.loose_eq(needle)))
    }

    /// Returns a new vector with `function(value, key)` applied to every entry.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::TypeMismatch`] for the first result that does
    /// not match the element type.
    pub fn map<F>(&self, function: F) -> Result<Self, VectorError>
    where
        F: FnMut(&Value, Key) -> Value,
    {
        let entries = algebra::map(&self.entries, function);
        self.element_type.check_all(entries.values())?;
        Ok(self.derive(entries))
    }

    /// Returns this vector's values followed by `other`'s values, keyed `0..n`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::TypeMismatch`] if `other` declares another element type.
    pub fn merge(&self, other: &Self) -> Result<Self, VectorError> {
        self.check_same_type(other)?;
        Ok(self.derive(algebra::merge(&self.entries, &other.entries)))
    }

    /// Returns the entries whose value does not occur in `values`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::TypeMismatch`] if any of `values` does not match.
    pub fn diff(&self, values: &[Value]) -> Result<Self, VectorError> {
        self.element_type.check_all(values)?;
        Ok(self.derive(algebra::by_value(&self.entries, values, false)))
    }

    /// Returns the entries whose value does not occur in `other`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::TypeMismatch`] if `other` declares another element type.
    pub fn diff_vector(&self, other: &Self) -> Result<Self, VectorError> {
        self.check_same_type(other)?;
        Ok(self.derive(algebra::by_value(&self.entries, &other.values(), false)))
    }

    /// Returns the entries whose value occurs in `values`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::TypeMismatch`] if any of `values` does not match.
    pub fn intersect(&self, values: &[Value]) -> Result<Self, VectorError> {
        self.element_type.check_all(values)?;
        Ok(self.derive(algebra::by_value(&self.entries, values, true)))
    }

    /// Returns the entries whose value occurs in `other`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::TypeMismatch`] if `other` declares another element type.
    pub fn intersect_vector(&self, other: &Self) -> Result<Self, VectorError> {
        self.check_same_type(other)?;
        Ok(self.derive(algebra::by_value(&self.entries, &other.values(), true)))
    }

    /// Returns a new vector where every pair of `pairs` overwrites or adds its key.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::TypeMismatch`] if any value does not match.
    pub fn replace(&self, pairs: impl IntoIterator<Item = (Key, Value)>) -> Result<Self, VectorError> {
        let pairs: Vec<(Key, Value)> = pairs.into_iter().collect();
        self.element_type.check_all(pairs.iter().map(|(_, value)| value))?;
        Ok(self.derive(algebra::replace(&self.entries, pairs)))
    }

    /// [`replace`](Self::replace) with the entries of another vector.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::TypeMismatch`] if `other` declares another element type.
    pub fn replace_vector(&self, other: &Self) -> Result<Self, VectorError> {
        self.check_same_type(other)?;
        Ok(self.derive(algebra::replace(&self.entries, other.pairs())))
    }

    /// Returns a new vector with `values` appended after the highest key.
    ///
    /// # Errors
    ///
    /// - [`VectorError::TypeMismatch`] if any value does not match.
    /// - [`VectorError::InvalidArgument`] if the keys would overflow.
    pub fn push(&self, values: impl IntoIterator<Item = Value>) -> Result<Self, VectorError> {
        let values: Vec<Value> = values.into_iter().collect();
        self.element_type.check_all(&values)?;
        algebra::push(&self.entries, values).map(|entries| self.derive(entries))
    }

    /// Returns a new vector with `values` placed before the existing entries.
    ///
    /// Keys follow the same rule as [`Vector::unshift`].
    ///
    /// # Errors
    ///
    /// - [`VectorError::TypeMismatch`] if any value does not match.
    /// - [`VectorError::InvalidArgument`] if the keys would underflow.
    pub fn unshift(&self, values: impl IntoIterator<Item = Value>) -> Result<Self, VectorError> {
        let values: Vec<Value> = values.into_iter().collect();
        self.element_type.check_all(&values)?;
        algebra::unshift(&self.entries, values).map(|entries| self.derive(entries))
    }
}

impl Collection for TypedVector {
    type Item = Value;

    #[inline]
    fn entries(&self) -> &Entries<Value> {
        &self.entries
    }

    #[inline]
    fn entries_mut(&mut self) -> &mut Entries<Value> {
        &mut self.entries
    }

    #[inline]
    fn with_entries(&self, entries: Entries<Value>) -> Self {
        self.derive(entries)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl IntoIterator for TypedVector {
    type Item = (Key, Value);
    type IntoIter = IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.entries.into_iter(),
        }
    }
}

impl<'a> IntoIterator for &'a TypedVector {
    type Item = (Key, &'a Value);
    type IntoIter = Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq for TypedVector {
    fn eq(&self, other: &Self) -> bool {
        self.element_type == other.element_type
            && self.entries.len() == other.entries.len()
            && self.entries.iter().eq(other.entries.iter())
    }
}

impl fmt::Debug for TypedVector {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TypedVector")
            .field("element_type", &self.element_type.name())
            .field("entries", &self.entries)
            .finish()
    }
}

impl fmt::Display for TypedVector {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}{}", self.element_type, self.to_untyped())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TypedVector {
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

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn integers(pairs: &[(Key, i64)]) -> TypedVector {
        TypedVector::new(
            ElementType::Integer,
            pairs.iter().map(|(key, value)| (*key, Value::Integer(*value))),
        )
        .unwrap()
    }

    #[rstest]
    fn test_new_rejects_mismatched_element() {
        let result = TypedVector::new(
            ElementType::Integer,
            [(0, Value::Integer(1)), (1, Value::Float(2.0))],
        );
        assert_eq!(
            result.err(),
            Some(VectorError::TypeMismatch {
                expected: "integer".to_string(),
                found: "double".to_string(),
            })
        );
    }

    #[rstest]
    fn test_display() {
        let vector = integers(&[(3, 1), (1, 2)]);
        assert_eq!(vector.to_string(), "integer{3: 1, 1: 2}");
    }

    #[rstest]
    fn test_equality_includes_element_type() {
        let floats = TypedVector::empty(ElementType::Float);
        let texts = TypedVector::empty(ElementType::Text);
        assert_ne!(floats, texts);
        assert_eq!(floats, TypedVector::empty(ElementType::Float));
    }

    #[rstest]
    fn test_with_entries_keeps_element_type() {
        let vector = integers(&[(1, 1), (2, 0)]);
        let filtered = vector.filter_truthy();
        assert_eq!(filtered.element_type(), &ElementType::Integer);
        assert_eq!(filtered.keys(), vec![1]);
    }
}
