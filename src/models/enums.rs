//! Enums for the SDK models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Schema-level type of a column
///
/// The closed set of primitive kinds a column can be inferred as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    /// Whole numbers
    Integer,
    /// Floating point numbers
    Float,
    /// Text and anything else the source reports as generic objects
    String,
}

impl ColumnType {
    /// Schema type tag (e.g. "INTEGER")
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Float => "FLOAT",
            ColumnType::String => "STRING",
        }
    }

    /// SQL column type used by the SQL exporter
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Float => "FLOAT",
            ColumnType::String => "VARCHAR",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INTEGER" => Ok(ColumnType::Integer),
            "FLOAT" => Ok(ColumnType::Float),
            "STRING" => Ok(ColumnType::String),
            other => Err(format!("Unknown column type: {}", other)),
        }
    }
}

/// Constraint that may only be set once per column
///
/// Foreign keys are not listed: re-pointing one overwrites the previous
/// target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConstraintKind {
    Unique,
    PrimaryKey,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConstraintKind::Unique => "unique",
            ConstraintKind::PrimaryKey => "primary key",
        };
        f.write_str(label)
    }
}
