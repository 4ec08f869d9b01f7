//! Table Modelling SDK - infer table schemas from tabular data
//!
//! Provides:
//! - Tabular sources (CSV files, in-memory column lists)
//! - Column type inference from raw source dtypes
//! - The `Model` schema aggregate with primary key, unique and foreign key constraints
//! - Relationship validation across a `DataModel`
//! - Export to table descriptors (JSON / YAML) and SQL
//! - TOML configuration driving the whole build

pub mod config;
pub mod export;
pub mod import;
pub mod inference;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{SchemaConfig, load_data_model};
pub use export::{
    DescriptorExporter, DescriptorFormat, ExportError, ExportResult, SQLExporter, SchemaConsumer,
    TableDescriptor,
};
pub use import::{CsvOptions, CsvSource, ImportError, InMemorySource, SourceColumn, TabularSource};
pub use inference::{InferenceConfig, InferenceError, TypeInferencer, UnknownTagPolicy};
pub use validation::{
    RelationshipValidationError, RelationshipValidationResult, RelationshipValidator,
};

// Re-export models
pub use models::enums::*;
pub use models::{
    Column, ColumnConstraints, DataModel, DataModelError, Model, ModelError, SharedModel,
};
