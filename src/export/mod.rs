//! Export functionality
//!
//! Schema consumers turn a finished [`Model`] into a persistence-layer
//! artifact:
//! - Table descriptors (JSON / YAML)
//! - SQL (CREATE TABLE statements)

pub mod descriptor;
pub mod sql;

use crate::models::Model;

/// Result of an export operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
}

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Model \"{0}\" has no columns")]
    EmptyModel(String),
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ExportError {
    fn from(err: serde_yaml::Error) -> Self {
        ExportError::SerializationError(err.to_string())
    }
}

impl From<crate::validation::RelationshipValidationError> for ExportError {
    fn from(err: crate::validation::RelationshipValidationError) -> Self {
        ExportError::ValidationError(err.to_string())
    }
}

/// A component that turns a finished model into its own representation
///
/// Consumers only read the model's public contract: name, columns, unique
/// columns, primary key and foreign keys.
pub trait SchemaConsumer {
    type Output;

    fn consume(&self, model: &Model) -> Result<Self::Output, ExportError>;
}

// Re-export for convenience
pub use descriptor::{
    DescriptorExporter, DescriptorFormat, FieldDescriptor, FieldKind, TableDescriptor,
};
pub use sql::SQLExporter;
