//! Error types for vector operations.
//!
//! Every fallible operation in this crate reports failure through
//! [`VectorError`]. Errors are raised at the boundary where the violation
//! is detected and are never recovered internally.

use thiserror::Error;

use crate::vector::Key;

/// Represents errors that can occur when reading from or transforming a vector.
///
/// # Examples
///
/// ```rust
/// use assoc_vector::error::VectorError;
/// use assoc_vector::vector::{Collection, Vector};
///
/// let vector = Vector::from_pairs([(1, "Foo"), (3, "Baz")]);
/// assert_eq!(vector.at(2), Err(VectorError::OffsetNotFound { key: 2 }));
/// assert_eq!(
///     format!("{}", VectorError::OffsetNotFound { key: 2 }),
///     "Offset \"2\" does not exist!"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VectorError {
    /// A key was read with [`at`](crate::vector::Collection::at) but is not present.
    #[error("Offset \"{key}\" does not exist!")]
    OffsetNotFound {
        /// The missing key.
        key: Key,
    },

    /// A structurally malformed argument, such as a non-integer key or a
    /// key range that would overflow.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Human-readable description of what was wrong.
        reason: String,
    },

    /// An element-type tag that names neither a primitive kind nor a
    /// registered class.
    #[error("Invalid type provided: {tag}")]
    InvalidType {
        /// The tag that failed to resolve.
        tag: String,
    },

    /// A value crossing a typed vector's boundary does not match its element type.
    #[error("Type mismatch: expected {expected}, {found} received")]
    TypeMismatch {
        /// The declared element type.
        expected: String,
        /// The kind of the rejected value.
        found: String,
    },
}

impl VectorError {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}
