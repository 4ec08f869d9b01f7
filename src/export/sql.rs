//! SQL exporter for generating CREATE TABLE statements from models.
//!
//! # Security
//!
//! All identifiers (table names, column names, referenced tables) are quoted
//! and escaped. Internal quote characters are escaped by doubling them
//! according to SQL standards.

use tracing::debug;

use super::descriptor::ensure_columns;
use super::{ExportError, ExportResult, SchemaConsumer};
use crate::models::{DataModel, Model};
use crate::validation::RelationshipValidator;

/// Exporter for SQL CREATE TABLE format.
#[derive(Debug, Clone)]
pub struct SQLExporter {
    dialect: String,
}

impl Default for SQLExporter {
    fn default() -> Self {
        Self::new("standard")
    }
}

impl SQLExporter {
    /// Create an exporter for a dialect ("postgres", "mysql", "sqlserver", ...)
    pub fn new(dialect: &str) -> Self {
        Self {
            dialect: dialect.to_lowercase(),
        }
    }

    pub fn dialect(&self) -> &str {
        &self.dialect
    }

    /// Export a model to a CREATE TABLE statement.
    ///
    /// # Example
    ///
    /// ```rust
    /// use table_modelling_sdk::export::SQLExporter;
    /// use table_modelling_sdk::import::InMemorySource;
    /// use table_modelling_sdk::models::Model;
    ///
    /// let source = InMemorySource::new("users").with_column("id", "int64");
    /// let mut model = Model::from_source(&source, None).unwrap();
    /// model.set_primary_key("id").unwrap();
    ///
    /// let sql = SQLExporter::new("postgres").export_model(&model).unwrap();
    /// assert_eq!(sql, "CREATE TABLE \"users\" (\n  \"id\" INTEGER PRIMARY KEY\n);\n");
    /// ```
    pub fn export_model(&self, model: &Model) -> Result<String, ExportError> {
        ensure_columns(model)?;

        let mut sql = format!("CREATE TABLE {} (\n", self.quote_identifier(model.name()));

        let column_defs: Vec<String> = model
            .columns()
            .iter()
            .map(|column| {
                let mut col_def = format!(
                    "  {} {}",
                    self.quote_identifier(column.name()),
                    column.column_type().sql_type()
                );

                if model.primary_key() == Some(column) {
                    col_def.push_str(" PRIMARY KEY");
                } else if model.unique().contains(column) {
                    col_def.push_str(" UNIQUE");
                }

                if let Some(target) = model.foreign_key().get(column.name()) {
                    col_def.push_str(&format!(" REFERENCES {}", self.quote_identifier(target)));
                }

                col_def
            })
            .collect();

        sql.push_str(&column_defs.join(",\n"));
        sql.push_str("\n);\n");
        Ok(sql)
    }

    /// Export every model of a data model, referenced tables first.
    ///
    /// Foreign keys to models outside the data model are rejected, since the
    /// generated `REFERENCES` clauses could not be created.
    pub fn export_data_model(&self, data_model: &DataModel) -> Result<ExportResult, ExportError> {
        let validator = RelationshipValidator::new();
        let validation = validator.validate(data_model);
        if let Some(dangling) = validation.dangling_references.into_iter().next() {
            return Err(crate::validation::RelationshipValidationError::from(dangling).into());
        }

        let order = validator.creation_order(data_model)?;
        debug!("Exporting {} tables in order {:?}", order.len(), order);

        let mut sql = String::new();
        for name in &order {
            let model = data_model
                .get(name)
                .ok_or_else(|| ExportError::ValidationError(format!("Unknown model {}", name)))?;
            sql.push_str(&self.export_model(model)?);
            sql.push('\n');
        }

        Ok(ExportResult {
            content: sql,
            format: "sql".to_string(),
        })
    }

    /// Quote and escape identifier based on SQL dialect.
    ///
    /// - **MySQL**: backticks
    /// - **SQL Server**: brackets
    /// - **PostgreSQL / standard SQL**: double quotes
    fn quote_identifier(&self, identifier: &str) -> String {
        match self.dialect.as_str() {
            "mysql" => format!("`{}`", identifier.replace('`', "``")),
            "sqlserver" | "mssql" => format!("[{}]", identifier.replace(']', "]]")),
            _ => format!("\"{}\"", identifier.replace('"', "\"\"")),
        }
    }
}

impl SchemaConsumer for SQLExporter {
    type Output = ExportResult;

    fn consume(&self, model: &Model) -> Result<ExportResult, ExportError> {
        Ok(ExportResult {
            content: self.export_model(model)?,
            format: "sql".to_string(),
        })
    }
}
