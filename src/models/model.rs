//! Model (schema aggregate) for the SDK
//!
//! A [`Model`] describes one table-like entity: its name, its ordered
//! columns and the constraints layered on top of them. Name and columns are
//! installed together by a single derive call; constraint state can only be
//! changed through [`Model::set_unique`], [`Model::set_primary_key`] and
//! [`Model::set_foreign_key`].

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use super::column::Column;
use super::enums::ConstraintKind;
use super::error::ModelError;
use crate::import::TabularSource;
use crate::inference::TypeInferencer;

/// Schema aggregate for one table
///
/// # Example
///
/// ```rust
/// use table_modelling_sdk::import::InMemorySource;
/// use table_modelling_sdk::models::Model;
///
/// let source = InMemorySource::new("data/trainer.csv")
///     .with_column("id", "int64")
///     .with_column("name", "object");
///
/// let mut model = Model::new();
/// model.derive_from(&source, Some("trainer")).unwrap();
/// model.set_primary_key("id").unwrap();
/// model.set_unique("name").unwrap();
///
/// assert_eq!(model.name(), "trainer");
/// assert_eq!(model.primary_key().map(|c| c.name()), Some("id"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Model {
    name: String,
    columns: Vec<Column>,
    unique: Vec<Column>,
    primary_key: Option<Column>,
    foreign_key: BTreeMap<String, String>,
}

/// The constraint facts a schema consumer needs for one column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnConstraints {
    pub primary_key: bool,
    pub unique: bool,
    /// Name of the referenced model, if the column is a foreign key
    pub references: Option<String>,
}

impl Model {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model derived from a tabular source with the strict inferencer
    pub fn from_source<S>(source: &S, name: Option<&str>) -> Result<Self, ModelError>
    where
        S: TabularSource + ?Sized,
    {
        let mut model = Self::new();
        model.derive_from(source, name)?;
        Ok(model)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in source order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Unique columns in the order they were marked
    pub fn unique(&self) -> &[Column] {
        &self.unique
    }

    pub fn primary_key(&self) -> Option<&Column> {
        self.primary_key.as_ref()
    }

    /// Foreign keys: column name -> referenced model name
    pub fn foreign_key(&self) -> &BTreeMap<String, String> {
        &self.foreign_key
    }

    /// Deterministic UUID v5 derived from the model name
    pub fn id(&self) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_DNS, self.name.as_bytes())
    }

    /// Derive name and columns from a tabular source
    ///
    /// Uses the strict [`TypeInferencer`]; see [`Model::derive_with`].
    pub fn derive_from<S>(&mut self, source: &S, name: Option<&str>) -> Result<(), ModelError>
    where
        S: TabularSource + ?Sized,
    {
        self.derive_with(source, name, &TypeInferencer::new())
    }

    /// Derive name and columns from a tabular source using `inferencer`
    ///
    /// The name is `name` when given, otherwise the source identifier with
    /// any directory and extension stripped. All-or-nothing: on error the
    /// model is left untouched. On success any constraints from an earlier
    /// derivation are cleared, since they refer to the replaced columns.
    pub fn derive_with<S>(
        &mut self,
        source: &S,
        name: Option<&str>,
        inferencer: &TypeInferencer,
    ) -> Result<(), ModelError>
    where
        S: TabularSource + ?Sized,
    {
        let source_columns = source.columns()?;

        let mut seen = HashSet::with_capacity(source_columns.len());
        let mut columns = Vec::with_capacity(source_columns.len());
        for (position, source_column) in source_columns.into_iter().enumerate() {
            if source_column.name.is_empty() {
                return Err(ModelError::EmptyColumnName(position));
            }
            if !seen.insert(source_column.name.clone()) {
                return Err(ModelError::DuplicateColumn(source_column.name));
            }
            let column_type = inferencer.infer(&source_column.raw_type).map_err(|source| {
                ModelError::TypeInference {
                    column: source_column.name.clone(),
                    source,
                }
            })?;
            debug!(
                "Inferred column \"{}\" ({}) as {}",
                source_column.name, source_column.raw_type, column_type
            );
            columns.push(Column::new(source_column.name, column_type));
        }

        let model_name = match name {
            Some(explicit) => explicit.to_string(),
            None => default_name(source.identifier()),
        };

        info!(
            "Derived model \"{}\" with {} columns",
            model_name,
            columns.len()
        );

        self.name = model_name;
        self.columns = columns;
        self.unique.clear();
        self.primary_key = None;
        self.foreign_key.clear();
        Ok(())
    }

    /// Resolve a column by exact name; the first match wins
    pub fn column(&self, name: &str) -> Result<&Column, ModelError> {
        self.columns
            .iter()
            .find(|column| column.name() == name)
            .ok_or_else(|| ModelError::ColumnNotFound(name.to_string()))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_ok()
    }

    /// Mark a column unique
    ///
    /// Marking the same column twice is an error.
    pub fn set_unique(&mut self, column_name: &str) -> Result<(), ModelError> {
        let column = self.column(column_name)?.clone();
        if self.unique.contains(&column) {
            return Err(ModelError::ConstraintAlreadySet {
                column: column_name.to_string(),
                kind: ConstraintKind::Unique,
            });
        }

        debug!("Model \"{}\": column \"{}\" set unique", self.name, column_name);
        self.unique.push(column);
        Ok(())
    }

    /// Set the primary key, replacing any previous one
    ///
    /// Re-setting the column that already is the primary key is an error.
    pub fn set_primary_key(&mut self, column_name: &str) -> Result<(), ModelError> {
        let column = self.column(column_name)?.clone();
        if self.primary_key.as_ref() == Some(&column) {
            return Err(ModelError::ConstraintAlreadySet {
                column: column_name.to_string(),
                kind: ConstraintKind::PrimaryKey,
            });
        }

        if let Some(previous) = &self.primary_key {
            debug!(
                "Model \"{}\": primary key moved from \"{}\" to \"{}\"",
                self.name,
                previous.name(),
                column_name
            );
        } else {
            debug!("Model \"{}\": primary key set to \"{}\"", self.name, column_name);
        }
        self.primary_key = Some(column);
        Ok(())
    }

    /// Make a column reference another model
    ///
    /// Only the referenced model's name is recorded. Re-setting overwrites.
    pub fn set_foreign_key(
        &mut self,
        column_name: &str,
        referenced: &Model,
    ) -> Result<(), ModelError> {
        self.set_foreign_key_by_name(column_name, referenced.name())
    }

    /// Same as [`Model::set_foreign_key`], keyed by the referenced model's name
    pub fn set_foreign_key_by_name(
        &mut self,
        column_name: &str,
        referenced_model: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.column(column_name)?;
        let referenced_model = referenced_model.into();

        debug!(
            "Model \"{}\": column \"{}\" references \"{}\"",
            self.name, column_name, referenced_model
        );
        self.foreign_key.insert(column_name.to_string(), referenced_model);
        Ok(())
    }

    /// Constraint facts for one column
    pub fn constraints_for(&self, column_name: &str) -> Result<ColumnConstraints, ModelError> {
        let column = self.column(column_name)?;
        Ok(ColumnConstraints {
            primary_key: self.primary_key.as_ref() == Some(column),
            unique: self.unique.contains(column),
            references: self.foreign_key.get(column_name).cloned(),
        })
    }
}

/// Default model name from a source identifier: the last path segment up to
/// its first `.`
fn default_name(identifier: &str) -> String {
    identifier
        .rsplit(['/', '\\'])
        .next()
        .and_then(|segment| segment.split('.').next())
        .unwrap_or_default()
        .to_string()
}
