//! # assoc-vector
//!
//! Immutable, insertion-ordered, integer-keyed vectors with host-array
//! semantics: sparse keys, ordered iteration and set-style operations
//! (diff, intersect, merge, replace), plus an optional run-time checked
//! element type.
//!
//! ## Overview
//!
//! - [`vector::Vector`]: vector of any element type
//! - [`vector::TypedVector`]: vector of [`element::Value`]s validated
//!   against a declared [`element::ElementType`] at every boundary
//! - [`vector::Collection`]: the read surface both share
//!
//! Every transforming operation returns a new vector holding its own copy
//! of the entries. `shift`, `pop` and `clear` are the only in-place
//! mutators.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` support
//! - `arc`: use `Arc` for shared element payloads, making vectors `Send + Sync`
//! - `fxhash`: use `rustc_hash` for the backing map
//! - `full`: enable all features
//!
//! ## Example
//!
//! ```rust
//! use assoc_vector::prelude::*;
//!
//! let vector = Vector::from_pairs([(0, "Foo"), (2, "Baz")]);
//! let merged = vector.merge(&Vector::from_pairs([(0, "Qux")]));
//! assert_eq!(merged.pairs(), vec![(0, "Foo"), (1, "Baz"), (2, "Qux")]);
//!
//! let typed = TypedVector::from_values(ElementType::Integer, [Value::Integer(1)]).unwrap();
//! assert!(typed.set(0, Value::from("text")).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use assoc_vector::prelude::*;
/// ```
pub mod prelude {
    pub use crate::element::*;
    pub use crate::error::*;
    pub use crate::vector::*;
}

pub mod element;
pub mod error;
pub mod vector;
