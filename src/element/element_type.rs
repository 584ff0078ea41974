//! Declared element types and the class registry they resolve against.

use std::collections::HashMap;
use std::fmt;

use super::{ReferenceCounter, Value};
use crate::error::VectorError;

// =============================================================================
// ClassName
// =============================================================================

#[derive(Debug)]
struct ClassInfo {
    name: String,
    parent: Option<ClassName>,
}

/// A class known to a [`ClassRegistry`], together with its ancestry.
///
/// A `ClassName` can only be obtained from a registry, so holding one
/// proves the class exists. Equality is identity: two classes are equal
/// only when they come from the same registration, so equally named
/// classes of unrelated registries differ.
#[derive(Clone)]
pub struct ClassName(ReferenceCounter<ClassInfo>);

impl ClassName {
    /// Returns the class name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Returns the direct parent class, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.0.parent.as_ref()
    }

    /// Returns `true` if this class is `other` or inherits from it.
    #[must_use]
    pub fn is_subclass_of(&self, other: &Self) -> bool {
        std::iter::successors(Some(self), |class| class.parent()).any(|class| class == other)
    }
}

impl PartialEq for ClassName {
    fn eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ClassName {}

impl fmt::Debug for ClassName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "ClassName({})", self.name())
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.name())
    }
}

// =============================================================================
// ClassRegistry
// =============================================================================

/// The set of class names a named [`ElementType`] may refer to.
///
/// # Examples
///
/// ```rust
/// use assoc_vector::element::ClassRegistry;
///
/// let mut registry = ClassRegistry::new();
/// let shape = registry.register("Shape", None).unwrap();
/// let circle = registry.register("Circle", Some("Shape")).unwrap();
///
/// assert!(circle.is_subclass_of(&shape));
/// assert!(!shape.is_subclass_of(&circle));
/// assert!(registry.register("Square", Some("Polygon")).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, ClassName>,
}

impl ClassRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name`, optionally inheriting from an already registered `parent`.
    ///
    /// # Errors
    ///
    /// - [`VectorError::InvalidType`] if `parent` is not registered.
    /// - [`VectorError::InvalidArgument`] if `name` is empty or already registered.
    pub fn register(&mut self, name: &str, parent: Option<&str>) -> Result<ClassName, VectorError> {
        if name.is_empty() {
            return Err(VectorError::invalid_argument("class name must not be empty"));
        }
        if self.classes.contains_key(name) {
            return Err(VectorError::invalid_argument(format!(
                "class {name} is already registered"
            )));
        }

        let parent = parent
            .map(|parent_name| {
                self.lookup(parent_name).ok_or_else(|| VectorError::InvalidType {
                    tag: parent_name.to_string(),
                })
            })
            .transpose()?;

        let class = ClassName(ReferenceCounter::new(ClassInfo {
            name: name.to_string(),
            parent,
        }));
        self.classes.insert(name.to_string(), class.clone());
        Ok(class)
    }

    /// Returns the registered class called `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<ClassName> {
        self.classes.get(name).cloned()
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Returns the number of registered classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if no class is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

// =============================================================================
// ElementType
// =============================================================================

/// The single element kind a [`TypedVector`](crate::vector::TypedVector) accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementType {
    /// [`Value::Integer`].
    Integer,
    /// [`Value::Text`].
    Text,
    /// [`Value::Float`].
    Float,
    /// [`Value::Boolean`].
    Boolean,
    /// [`Value::Sequence`].
    Sequence,
    /// [`Value::Handle`].
    Handle,
    /// [`Value::Object`] of the given class or one of its subclasses.
    Named(ClassName),
}

impl ElementType {
    /// Resolves a type tag to an element type.
    ///
    /// Primitive tags are `integer`/`int`, `string`/`text`,
    /// `double`/`float`, `boolean`/`bool`, `array`/`sequence` and
    /// `resource`/`handle`. Any other tag must name a class registered in
    /// `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::InvalidType`] if the tag is not recognized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use assoc_vector::element::{ClassRegistry, ElementType};
    ///
    /// let registry = ClassRegistry::new();
    /// assert_eq!(ElementType::resolve("double", &registry), Ok(ElementType::Float));
    /// assert!(ElementType::resolve("DateTime", &registry).is_err());
    /// ```
    pub fn resolve(tag: &str, registry: &ClassRegistry) -> Result<Self, VectorError> {
        let element_type = match tag {
            "integer" | "int" => Self::Integer,
            "string" | "text" => Self::Text,
            "double" | "float" => Self::Float,
            "boolean" | "bool" => Self::Boolean,
            "array" | "sequence" => Self::Sequence,
            "resource" | "handle" => Self::Handle,
            class => match registry.lookup(class) {
                Some(class_name) => Self::Named(class_name),
                None => {
                    tracing::debug!(tag, "element type tag did not resolve");
                    return Err(VectorError::InvalidType {
                        tag: tag.to_string(),
                    });
                }
            },
        };
        Ok(element_type)
    }

    /// Returns the canonical name of this type.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Integer => "integer",
            Self::Text => "string",
            Self::Float => "double",
            Self::Boolean => "boolean",
            Self::Sequence => "array",
            Self::Handle => "resource",
            Self::Named(class) => class.name(),
        }
    }

    /// Returns `true` if `value` may cross the boundary of a vector of this type.
    ///
    /// [`Value::Null`] is always accepted.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null)
            | (Self::Integer, Value::Integer(_))
            | (Self::Text, Value::Text(_))
            | (Self::Float, Value::Float(_))
            | (Self::Boolean, Value::Boolean(_))
            | (Self::Sequence, Value::Sequence(_))
            | (Self::Handle, Value::Handle(_)) => true,
            (Self::Named(class), Value::Object(object)) => object.class().is_subclass_of(class),
            _ => false,
        }
    }

    /// Fails with [`VectorError::TypeMismatch`] unless `value` is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::TypeMismatch`] naming both kinds.
    pub fn check(&self, value: &Value) -> Result<(), VectorError> {
        if self.accepts(value) {
            Ok(())
        } else {
            tracing::debug!(
                expected = self.name(),
                found = value.type_name(),
                "value rejected by element type"
            );
            Err(VectorError::TypeMismatch {
                expected: self.name().to_string(),
                found: value.type_name().to_string(),
            })
        }
    }

    /// Checks every value yielded by `values`, stopping at the first mismatch.
    ///
    /// # Errors
    ///
    /// Returns the first [`VectorError::TypeMismatch`].
    pub fn check_all<'a>(&self, values: impl IntoIterator<Item = &'a Value>) -> Result<(), VectorError> {
        values.into_iter().try_for_each(|value| self.check(value))
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.name())
    }
}
