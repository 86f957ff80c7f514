//! Error types for the row binding.

use thiserror::Error;

/// Errors that can occur while binding a document to a row.
#[derive(Error, Debug)]
pub enum RecordError {
    /// The underlying document operation failed (construction from a row
    /// payload, mutation, or serialization at save time).
    #[error(transparent)]
    Document(#[from] satchel_core::SatchelError),
}

/// Convenience alias used throughout satchel-record.
pub type Result<T> = std::result::Result<T, RecordError>;
