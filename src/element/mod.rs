//! Element model shared by the untyped and typed vectors.
//!
//! - [`Element`]: what a value type must provide to live in a
//!   [`Vector`](crate::vector::Vector) (an absence sentinel, truthiness,
//!   loose equality)
//! - [`Value`]: a closed sum type of every element kind a
//!   [`TypedVector`](crate::vector::TypedVector) can hold
//! - [`ElementType`]: the declared kind a typed vector enforces, resolved
//!   once from a tag through a [`ClassRegistry`]
//!
//! # Examples
//!
//! ```rust
//! use assoc_vector::element::{ClassRegistry, Element, ElementType, Value};
//!
//! let registry = ClassRegistry::new();
//! let element_type = ElementType::resolve("integer", &registry).unwrap();
//!
//! assert!(element_type.accepts(&Value::Integer(7)));
//! assert!(element_type.accepts(&Value::Null));
//! assert!(!element_type.accepts(&Value::from("7")));
//!
//! assert!(!Value::from("0").is_truthy());
//! assert!(Value::from("7").loose_eq(&Value::Integer(7)));
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted pointer used for shared element payloads.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc` and vectors
/// become `Send + Sync`. Otherwise it is `std::rc::Rc`.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod element_type;
mod value;

pub use element_type::ClassName;
pub use element_type::ClassRegistry;
pub use element_type::ElementType;
pub use value::Object;
pub use value::ResourceHandle;
pub use value::Value;

// =============================================================================
// Element Trait
// =============================================================================

/// A value type that can be stored in a [`Vector`](crate::vector::Vector).
///
/// Set-style operations compare elements with `PartialEq`; the remaining
/// requirements model the host-array conventions the vector follows.
pub trait Element: Clone + PartialEq {
    /// The "no value" marker used to fill keys that `only` finds missing.
    fn absent() -> Self;

    /// Returns `true` if this is the absence sentinel.
    fn is_absent(&self) -> bool;

    /// Truthiness used by [`filter_truthy`](crate::vector::Collection::filter_truthy).
    fn is_truthy(&self) -> bool;

    /// Loose equality used by `contains_loose`. Defaults to `==`.
    fn loose_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl<T: Clone + PartialEq> Element for Option<T> {
    #[inline]
    fn absent() -> Self {
        None
    }

    #[inline]
    fn is_absent(&self) -> bool {
        self.is_none()
    }

    #[inline]
    fn is_truthy(&self) -> bool {
        self.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_option_element() {
        assert_eq!(<Option<i32> as Element>::absent(), None);
        assert!(None::<i32>.is_absent());
        assert!(!Some(0).is_absent());
        assert!(Some(0).is_truthy());
        assert!(!None::<i32>.is_truthy());
        assert!(Some(3).loose_eq(&Some(3)));
        assert!(!Some(3).loose_eq(&Some(4)));
    }
}
