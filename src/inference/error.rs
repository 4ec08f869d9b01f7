//! Error types for type inference

use thiserror::Error;

/// Errors that can occur during type inference
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    /// The source reported a raw type tag with no schema mapping
    #[error("Unsupported column type \"{tag}\"")]
    UnsupportedType { tag: String },
}
