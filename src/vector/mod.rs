//! Insertion-ordered, integer-keyed vectors.
//!
//! This module provides two collections over the same ordered
//! `Key -> value` store:
//!
//! - [`Vector`]: elements of any type `V`
//! - [`TypedVector`]: [`Value`] elements checked against a declared
//!   [`ElementType`](crate::element::ElementType) at every boundary
//!
//! Both implement [`Collection`], the shared read and in-place surface.
//!
//! # Copy-on-write
//!
//! Every transforming operation (`set`, `push`, `merge`, `diff`, ...)
//! copies the whole backing map and returns a new vector; the receiver is
//! never touched. Only [`Collection::shift`], [`Collection::pop`] and
//! [`Collection::clear`] mutate in place.
//!
//! # Insertion order
//!
//! Iteration follows insertion order, not numeric key order. `first_key`
//! and `last_key` refer to the first and last inserted entries still
//! present.
//!
//! # Examples
//!
//! ```rust
//! use assoc_vector::vector::{Collection, Vector};
//!
//! let vector = Vector::from_pairs([(3, "three"), (1, "one")]);
//! assert_eq!(vector.first_key(), Some(3));
//! assert_eq!(vector.keys(), vec![3, 1]);
//!
//! let updated = vector.set(2, "two");
//! assert_eq!(vector.len(), 2);  // Original unchanged
//! assert_eq!(updated.len(), 3); // New version
//!
//! let pushed = updated.push(["four"]).unwrap();
//! assert_eq!(pushed.last_key(), Some(4));
//! ```

use indexmap::IndexMap;

use crate::element::Value;
use crate::error::VectorError;

/// The key type of every vector.
pub type Key = i64;

/// Hash builder of the backing map.
///
/// `rustc_hash::FxBuildHasher` with the `fxhash` feature, the std
/// `RandomState` otherwise.
#[cfg(feature = "fxhash")]
pub type EntryHasher = rustc_hash::FxBuildHasher;

/// Hash builder of the backing map.
///
/// `rustc_hash::FxBuildHasher` with the `fxhash` feature, the std
/// `RandomState` otherwise.
#[cfg(not(feature = "fxhash"))]
pub type EntryHasher = std::collections::hash_map::RandomState;

/// The insertion-ordered backing store of a vector.
pub type Entries<V> = IndexMap<Key, V, EntryHasher>;

mod algebra;
mod collection;
mod typed;
mod untyped;

pub use collection::Collection;
pub use collection::IntoIter;
pub use collection::Iter;
pub use typed::TypedVector;
pub use untyped::Vector;

/// Converts dynamically typed keys into a key list.
///
/// # Errors
///
/// Returns [`VectorError::InvalidArgument`] if any value is not an integer.
///
/// # Examples
///
/// ```rust
/// use assoc_vector::element::Value;
/// use assoc_vector::vector::key_set;
///
/// assert_eq!(key_set(&[Value::Integer(1), Value::Integer(3)]), Ok(vec![1, 3]));
/// assert!(key_set(&[Value::Integer(1), Value::from("3")]).is_err());
/// ```
pub fn key_set(values: &[Value]) -> Result<Vec<Key>, VectorError> {
    values
        .iter()
        .map(|value| {
            value.as_integer().ok_or_else(|| {
                tracing::debug!(found = value.type_name(), "non-integer key rejected");
                VectorError::invalid_argument(format!(
                    "keys have to be integers, {} received",
                    value.type_name()
                ))
            })
        })
        .collect()
}

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(Vector<Value>: Send, Sync);
#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(TypedVector: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(Vector<Value>: Send, Sync);
#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(TypedVector: Send, Sync);
