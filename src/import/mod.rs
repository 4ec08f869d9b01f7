//! Import functionality
//!
//! Provides tabular data sources that a [`Model`](crate::models::Model) can be
//! derived from:
//! - CSV files (header row plus records, dtypes sniffed from the values)
//! - In-memory column lists

pub mod csv_source;

/// Error during import
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Source \"{0}\" has no header row")]
    MissingHeader(String),
}

/// One column as reported by a tabular source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceColumn {
    /// Column name, passed through exactly as the source reports it
    pub name: String,
    /// Raw type tag (e.g. "int64", "float64", "object")
    pub raw_type: String,
}

impl SourceColumn {
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
        }
    }
}

/// A tabular data source yielding named columns with raw type tags
pub trait TabularSource {
    /// Identifier usable as a default schema name
    fn identifier(&self) -> &str;

    /// Columns in source order
    fn columns(&self) -> Result<Vec<SourceColumn>, ImportError>;
}

/// Tabular source backed by a fixed list of columns
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    identifier: String,
    columns: Vec<SourceColumn>,
}

impl InMemorySource {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            columns: Vec::new(),
        }
    }

    /// Append a column
    pub fn with_column(mut self, name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        self.columns.push(SourceColumn::new(name, raw_type));
        self
    }
}

impl TabularSource for InMemorySource {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn columns(&self) -> Result<Vec<SourceColumn>, ImportError> {
        Ok(self.columns.clone())
    }
}

// Re-export for convenience
pub use csv_source::{CsvOptions, CsvSource};
