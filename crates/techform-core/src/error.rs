//! # Error Types
//!
//! Operational errors for techform. These cover failures that are not the
//! user's fault: unreadable or malformed input documents, and field keys
//! coming from scripts that name no field.
//!
//! Field-level validation failures are never represented here; they travel
//! as [`crate::FieldErrors`] inside [`crate::ValidationOutcome::Failure`].

use thiserror::Error;

/// Top-level error type for techform.
#[derive(Error, Debug)]
pub enum TechformError {
    /// A field key string did not name any field of the record.
    #[error("invalid field key: {0:?}")]
    InvalidFieldKey(String),

    /// The raw input document could not be loaded or parsed.
    #[error("input load error for '{source_name}': {reason}")]
    InputLoad {
        /// File path, or `<stdin>`.
        source_name: String,
        /// Reason the document could not be loaded.
        reason: String,
    },
}
