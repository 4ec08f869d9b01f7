//! Raw type tag to column type mapping

use tracing::warn;

use super::config::{InferenceConfig, UnknownTagPolicy};
use super::error::InferenceError;
use crate::models::ColumnType;

const INTEGER_TAGS: &[&str] = &[
    "int8", "int16", "int32", "int64", "uint8", "uint16", "uint32", "uint64",
];
const FLOAT_TAGS: &[&str] = &["float16", "float32", "float64"];
const STRING_TAGS: &[&str] = &["object", "string"];

/// Every raw tag with a known mapping
pub fn known_tags() -> impl Iterator<Item = &'static str> {
    INTEGER_TAGS
        .iter()
        .chain(FLOAT_TAGS)
        .chain(STRING_TAGS)
        .copied()
}

/// Maps raw source type tags onto column types
///
/// Stateless apart from its configuration; the same tag always maps to the
/// same result.
#[derive(Debug, Clone, Default)]
pub struct TypeInferencer {
    config: InferenceConfig,
}

impl TypeInferencer {
    /// Create an inferencer with the strict default configuration
    pub fn new() -> Self {
        Self::with_config(InferenceConfig::default())
    }

    pub fn with_config(config: InferenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Infer the column type for a raw tag
    ///
    /// Tags are compared exactly; no case folding or trimming is applied.
    pub fn infer(&self, raw_tag: &str) -> Result<ColumnType, InferenceError> {
        if let Some(column_type) = lookup(raw_tag) {
            return Ok(column_type);
        }

        match self.config.unknown_tag_policy {
            UnknownTagPolicy::Strict => Err(InferenceError::UnsupportedType {
                tag: raw_tag.to_string(),
            }),
            UnknownTagPolicy::Permissive => {
                warn!("Unknown column type \"{}\", falling back to STRING", raw_tag);
                Ok(ColumnType::String)
            }
        }
    }
}

fn lookup(raw_tag: &str) -> Option<ColumnType> {
    if INTEGER_TAGS.contains(&raw_tag) {
        Some(ColumnType::Integer)
    } else if FLOAT_TAGS.contains(&raw_tag) {
        Some(ColumnType::Float)
    } else if STRING_TAGS.contains(&raw_tag) {
        Some(ColumnType::String)
    } else {
        None
    }
}
