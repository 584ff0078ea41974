//! Dynamic element values.
//!
//! [`Value`] covers every element kind a typed vector can declare:
//! integers, text, floats, booleans, untyped sequences, opaque resource
//! handles and instances of registered classes, plus [`Value::Null`] as
//! the absence sentinel.

use std::collections::BTreeMap;
use std::fmt;

use super::{ClassName, Element, ReferenceCounter};

// =============================================================================
// ResourceHandle
// =============================================================================

#[derive(Debug)]
struct HandleInner {
    kind: String,
}

/// An opaque handle to an external resource.
///
/// Handles have identity semantics: two handles are equal only when they
/// are clones of the same handle, even if their kinds match.
///
/// # Examples
///
/// ```rust
/// use assoc_vector::element::ResourceHandle;
///
/// let stream = ResourceHandle::new("stream");
/// assert_eq!(stream, stream.clone());
/// assert_ne!(stream, ResourceHandle::new("stream"));
/// ```
#[derive(Clone)]
pub struct ResourceHandle(ReferenceCounter<HandleInner>);

impl ResourceHandle {
    /// Creates a new handle of the given resource kind.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self(ReferenceCounter::new(HandleInner { kind: kind.into() }))
    }

    /// Returns the resource kind this handle was created with.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.0.kind
    }
}

impl PartialEq for ResourceHandle {
    fn eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ResourceHandle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "ResourceHandle({})", self.0.kind)
    }
}

// =============================================================================
// Object
// =============================================================================

/// An instance of a registered class with named properties.
///
/// # Examples
///
/// ```rust
/// use assoc_vector::element::{ClassRegistry, Object, Value};
///
/// let mut registry = ClassRegistry::new();
/// let point = registry.register("Point", None).unwrap();
///
/// let origin = Object::new(point)
///     .with_property("x", 0)
///     .with_property("y", 0);
/// assert_eq!(origin.property("x"), Some(&Value::Integer(0)));
/// assert_eq!(origin.class().name(), "Point");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    class: ClassName,
    properties: BTreeMap<String, Value>,
}

impl Object {
    /// Creates an instance of `class` without properties.
    #[must_use]
    pub const fn new(class: ClassName) -> Self {
        Self {
            class,
            properties: BTreeMap::new(),
        }
    }

    /// Returns a copy of this object with `name` set to `value`.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Returns the class of this object.
    #[must_use]
    pub const fn class(&self) -> &ClassName {
        &self.class
    }

    /// Returns the property stored under `name`.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Returns all properties ordered by name.
    #[must_use]
    pub const fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }

    fn loose_eq(&self, other: &Self) -> bool {
        self.class == other.class
            && self.properties.len() == other.properties.len()
            && self.properties.iter().all(|(name, value)| {
                other
                    .properties
                    .get(name)
                    .is_some_and(|other_value| value.loose_eq(other_value))
            })
    }
}

// =============================================================================
// Value
// =============================================================================

/// A dynamically typed element.
///
/// `PartialEq` is strict: variants must match and contents must be equal
/// (`Integer(1) != Float(1.0)`). Use [`Element::loose_eq`] for the
/// converting comparison.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The absence sentinel.
    #[default]
    Null,
    /// A signed integer.
    Integer(i64),
    /// A text string.
    Text(String),
    /// A floating-point number.
    Float(f64),
    /// A boolean.
    Boolean(bool),
    /// An untyped ordered sequence of values.
    Sequence(Vec<Value>),
    /// An opaque resource handle.
    Handle(ResourceHandle),
    /// An instance of a registered class.
    Object(Object),
}

impl Value {
    /// Returns the kind name of this value.
    ///
    /// Primitive kinds use the names accepted by
    /// [`ElementType::resolve`](super::ElementType::resolve); objects report
    /// their class name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Null => "NULL",
            Self::Integer(_) => "integer",
            Self::Text(_) => "string",
            Self::Float(_) => "double",
            Self::Boolean(_) => "boolean",
            Self::Sequence(_) => "array",
            Self::Handle(_) => "resource",
            Self::Object(object) => object.class().name(),
        }
    }

    /// Returns `true` if this is [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(integer) => Some(*integer),
            _ => None,
        }
    }

    /// Returns the text payload, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the float payload, if any.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(float) => Some(*float),
            _ => None,
        }
    }

    /// Returns the boolean payload, if any.
    #[must_use]
    pub const fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(boolean) => Some(*boolean),
            _ => None,
        }
    }

    /// Returns the sequence payload, if any.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    /// Returns the object payload, if any.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    const fn as_number(&self) -> Option<Number> {
        match self {
            Self::Integer(integer) => Some(Number::Integer(*integer)),
            Self::Float(float) => Some(Number::Float(*float)),
            _ => None,
        }
    }
}

/// A numeric operand of loose comparison.
///
/// Two integers compare exactly; any float on either side widens both to `f64`.
#[derive(Debug, Clone, Copy)]
enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    #[allow(clippy::cast_precision_loss)]
    const fn widen(self) -> f64 {
        match self {
            Self::Integer(integer) => integer as f64,
            Self::Float(float) => float,
        }
    }

    fn loose_eq(self, other: Self) -> bool {
        match (self, other) {
            (Self::Integer(left), Self::Integer(right)) => left == right,
            _ => self.widen() == other.widen(),
        }
    }
}

/// Parses text the way the host treats numeric strings: optional
/// surrounding whitespace, sign, digits, fraction and exponent.
///
/// Integer-valued text stays an integer; fractions and exponents parse as floats.
fn numeric_text(text: &str) -> Option<Number> {
    let trimmed = text.trim();
    let well_formed = trimmed.bytes().any(|byte| byte.is_ascii_digit())
        && trimmed
            .bytes()
            .all(|byte| byte.is_ascii_digit() || matches!(byte, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !well_formed {
        return None;
    }
    trimmed.parse::<i64>().map(Number::Integer).ok().or_else(|| {
        trimmed.parse::<f64>().ok().map(Number::Float)
    })
}

fn number_loose_eq(number: &Value, text: &str) -> bool {
    match (number.as_number(), numeric_text(text)) {
        (Some(left), Some(right)) => left.loose_eq(right),
        _ => number.to_string() == text,
    }
}

impl Element for Value {
    #[inline]
    fn absent() -> Self {
        Self::Null
    }

    #[inline]
    fn is_absent(&self) -> bool {
        self.is_null()
    }

    fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Integer(integer) => *integer != 0,
            Self::Float(float) => *float != 0.0,
            Self::Text(text) => !(text.is_empty() || text == "0"),
            Self::Boolean(boolean) => *boolean,
            Self::Sequence(sequence) => !sequence.is_empty(),
            Self::Handle(_) | Self::Object(_) => true,
        }
    }

    fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(boolean), any) | (any, Self::Boolean(boolean)) => {
                *boolean == any.is_truthy()
            }
            (Self::Null, Self::Text(text)) | (Self::Text(text), Self::Null) => text.is_empty(),
            (Self::Null, any) | (any, Self::Null) => !any.is_truthy(),
            (Self::Integer(left), Self::Integer(right)) => left == right,
            (Self::Integer(_) | Self::Float(_), Self::Integer(_) | Self::Float(_)) => self
                .as_number()
                .zip(other.as_number())
                .is_some_and(|(left, right)| left.loose_eq(right)),
            (number @ (Self::Integer(_) | Self::Float(_)), Self::Text(text))
            | (Self::Text(text), number @ (Self::Integer(_) | Self::Float(_))) => {
                number_loose_eq(number, text)
            }
            (Self::Text(left), Self::Text(right)) => {
                match (numeric_text(left), numeric_text(right)) {
                    (Some(left_number), Some(right_number)) => left_number.loose_eq(right_number),
                    _ => left == right,
                }
            }
            (Self::Sequence(left), Self::Sequence(right)) => {
                left.len() == right.len()
                    && left
                        .iter()
                        .zip(right)
                        .all(|(left_item, right_item)| left_item.loose_eq(right_item))
            }
            (Self::Handle(left), Self::Handle(right)) => left == right,
            (Self::Object(left), Self::Object(right)) => left.loose_eq(right),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(formatter, "null"),
            Self::Integer(integer) => write!(formatter, "{integer}"),
            Self::Text(text) => write!(formatter, "{text}"),
            Self::Float(float) => write!(formatter, "{float}"),
            Self::Boolean(boolean) => write!(formatter, "{boolean}"),
            Self::Sequence(sequence) => {
                write!(formatter, "[")?;
                for (index, item) in sequence.iter().enumerate() {
                    if index > 0 {
                        write!(formatter, ", ")?;
                    }
                    write!(formatter, "{item}")?;
                }
                write!(formatter, "]")
            }
            Self::Handle(handle) => write!(formatter, "resource({})", handle.kind()),
            Self::Object(object) => write!(formatter, "{}", object.class().name()),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<Self>> for Value {
    fn from(value: Vec<Self>) -> Self {
        Self::Sequence(value)
    }
}

impl From<ResourceHandle> for Value {
    fn from(value: ResourceHandle) -> Self {
        Self::Handle(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// =============================================================================
// Serde
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{SerializeMap, SerializeSeq};
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Integer(integer) => serializer.serialize_i64(*integer),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Float(float) => serializer.serialize_f64(*float),
            Self::Boolean(boolean) => serializer.serialize_bool(*boolean),
            Self::Sequence(sequence) => {
                let mut seq = serializer.serialize_seq(Some(sequence.len()))?;
                for item in sequence {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Handle(handle) => serializer.serialize_str(&format!("resource({})", handle.kind())),
            Self::Object(object) => {
                let mut map = serializer.serialize_map(Some(object.properties().len()))?;
                for (name, value) in object.properties() {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(feature = "serde")]
struct ValueVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("null, a boolean, a number, a string or a sequence")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde::Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
        Ok(Value::Boolean(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Value::Integer(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        i64::try_from(value)
            .map(Value::Integer)
            .map_err(|_| E::custom(format!("integer {value} is out of range")))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Value::Float(value))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Value::Text(value.to_string()))
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
        Ok(Value::Text(value))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}
