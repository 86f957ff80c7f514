//! Error types for document construction, mutation, and materialization.

use thiserror::Error;

/// Errors that can occur while building or materializing a document.
#[derive(Error, Debug)]
pub enum SatchelError {
    /// The input string was not valid JSON (construction path).
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// JSON text parsed to something other than an object at the top level.
    #[error("top-level JSON value must be an object, got {0}")]
    TopLevelNotObject(&'static str),

    /// A value of this type cannot be stored in a strict document.
    /// Convert the value, or build the document with `allow_opaque`.
    #[error("type `{0}` is not allowed in a strict document")]
    DisallowedType(&'static str),

    /// The document holds a value that has no JSON representation
    /// (serialization path).
    #[error("value of type `{0}` cannot be serialized to JSON")]
    NotSerializable(&'static str),

    /// Strict lookup on a missing key.
    #[error("key `{0}` not found")]
    KeyNotFound(String),

    /// List index past the end of the list.
    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Recursion limit hit while walking the document tree. Only reachable
    /// when shared handles form a reference cycle.
    #[error("nesting depth exceeds {0}; the document likely contains a reference cycle")]
    DepthLimitExceeded(usize),

    /// An invariant was violated. Triggering this is a bug in the caller's
    /// use of shared handles or in this library, never bad input.
    #[error("internal invariant violated: {0}")]
    Internal(&'static str),
}

/// Convenience alias used throughout satchel-core.
pub type Result<T> = std::result::Result<T, SatchelError>;
