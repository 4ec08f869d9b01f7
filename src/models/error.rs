//! Error types for model operations

use thiserror::Error;

use super::enums::ConstraintKind;
use crate::import::ImportError;
use crate::inference::InferenceError;

/// Errors raised while deriving or annotating a [`Model`](super::Model)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The tabular source could not be read
    #[error("Failed to read source: {0}")]
    SourceRead(#[from] ImportError),

    /// A source column reported a raw type with no mapping
    #[error("Column \"{column}\": {source}")]
    TypeInference {
        column: String,
        #[source]
        source: InferenceError,
    },

    /// A constraint operation named a column the model does not have
    #[error("Column \"{0}\" not found")]
    ColumnNotFound(String),

    /// Redundant unique or identical primary key assignment
    #[error("Column \"{column}\" already {kind}")]
    ConstraintAlreadySet {
        column: String,
        kind: ConstraintKind,
    },

    /// The source reported the same column name twice
    #[error("Duplicate column \"{0}\"")]
    DuplicateColumn(String),

    /// The source reported a column without a name
    #[error("Column at position {0} has an empty name")]
    EmptyColumnName(usize),

    /// A shared model's lock was poisoned by a panicking writer
    #[error("Model lock poisoned")]
    LockPoisoned,
}
