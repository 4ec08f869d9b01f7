//! Column model for the SDK

use super::enums::ColumnType;
use serde::{Deserialize, Serialize};

/// Column model representing a field in a table
///
/// A column is an immutable value: a name plus the type inferred for it.
/// Two columns are equal when both name and type match.
///
/// # Example
///
/// ```rust
/// use table_modelling_sdk::models::{Column, ColumnType};
///
/// let column = Column::new("id", ColumnType::Integer);
/// assert_eq!(column.name(), "id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    name: String,
    #[serde(rename = "type")]
    column_type: ColumnType,
}

impl Column {
    /// Create a new column with the given name and type
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }
}
