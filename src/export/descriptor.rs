//! Static table descriptors
//!
//! A [`TableDescriptor`] is the flat, serialisable view of a [`Model`] that
//! code generators and ORM binders work from: one entry per column with its
//! type and the constraints attached to it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ExportError, ExportResult, SchemaConsumer};
use crate::models::{ColumnType, DataModel, Model};

/// The role a column plays in generated table bindings
///
/// When a column carries several constraints the first applicable kind in
/// declaration order wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    PrimaryKey,
    Unique,
    ForeignKey,
    Plain,
}

/// One column of a table descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub kind: FieldKind,
    pub primary_key: bool,
    pub unique: bool,
    /// Referenced model name for foreign keys
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
}

/// Static description of a table built from a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDescriptor {
    pub id: Uuid,
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl TableDescriptor {
    pub fn from_model(model: &Model) -> Self {
        let fields = model
            .columns()
            .iter()
            .map(|column| {
                let primary_key = model.primary_key() == Some(column);
                let unique = model.unique().contains(column);
                let references = model.foreign_key().get(column.name()).cloned();
                let kind = if primary_key {
                    FieldKind::PrimaryKey
                } else if unique {
                    FieldKind::Unique
                } else if references.is_some() {
                    FieldKind::ForeignKey
                } else {
                    FieldKind::Plain
                };

                FieldDescriptor {
                    name: column.name().to_string(),
                    column_type: column.column_type(),
                    kind,
                    primary_key,
                    unique,
                    references,
                }
            })
            .collect();

        Self {
            id: model.id(),
            name: model.name().to_string(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Output format of the descriptor exporter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DescriptorFormat {
    #[default]
    Json,
    Yaml,
}

impl DescriptorFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DescriptorFormat::Json => "json",
            DescriptorFormat::Yaml => "yaml",
        }
    }
}

/// Exporter rendering table descriptors as JSON or YAML
#[derive(Debug, Clone, Default)]
pub struct DescriptorExporter {
    format: DescriptorFormat,
}

impl DescriptorExporter {
    pub fn new(format: DescriptorFormat) -> Self {
        Self { format }
    }

    /// Export every model of a data model as a list of descriptors
    pub fn export_data_model(&self, data_model: &DataModel) -> Result<ExportResult, ExportError> {
        let descriptors = data_model
            .models()
            .iter()
            .map(|model| {
                ensure_columns(model)?;
                Ok(TableDescriptor::from_model(model))
            })
            .collect::<Result<Vec<_>, ExportError>>()?;
        self.render(&descriptors)
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<ExportResult, ExportError> {
        let content = match self.format {
            DescriptorFormat::Json => serde_json::to_string_pretty(value)?,
            DescriptorFormat::Yaml => serde_yaml::to_string(value)?,
        };
        Ok(ExportResult {
            content,
            format: self.format.as_str().to_string(),
        })
    }
}

impl SchemaConsumer for DescriptorExporter {
    type Output = ExportResult;

    fn consume(&self, model: &Model) -> Result<ExportResult, ExportError> {
        ensure_columns(model)?;
        self.render(&TableDescriptor::from_model(model))
    }
}

pub(crate) fn ensure_columns(model: &Model) -> Result<(), ExportError> {
    if model.columns().is_empty() {
        return Err(ExportError::EmptyModel(model.name().to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::InMemorySource;

    fn trainer() -> Model {
        let source = InMemorySource::new("trainer")
            .with_column("id", "int64")
            .with_column("name", "object")
            .with_column("pokemon_id", "int64")
            .with_column("badge", "object");
        let mut model = Model::from_source(&source, None).unwrap();
        model.set_primary_key("id").unwrap();
        model.set_unique("name").unwrap();
        model.set_unique("id").unwrap();
        model.set_foreign_key_by_name("pokemon_id", "pokemon").unwrap();
        model
    }

    #[test]
    fn test_descriptor_kinds() {
        let descriptor = TableDescriptor::from_model(&trainer());
        assert_eq!(descriptor.name, "trainer");
        assert_eq!(descriptor.fields.len(), 4);

        let id = descriptor.field("id").unwrap();
        assert_eq!(id.kind, FieldKind::PrimaryKey);
        assert!(id.primary_key && id.unique);

        assert_eq!(descriptor.field("name").unwrap().kind, FieldKind::Unique);

        let fk = descriptor.field("pokemon_id").unwrap();
        assert_eq!(fk.kind, FieldKind::ForeignKey);
        assert_eq!(fk.references.as_deref(), Some("pokemon"));

        let badge = descriptor.field("badge").unwrap();
        assert_eq!(badge.kind, FieldKind::Plain);
        assert_eq!(badge.column_type, ColumnType::String);
    }

    #[test]
    fn test_json_export() {
        let result = DescriptorExporter::default().consume(&trainer()).unwrap();
        assert_eq!(result.format, "json");

        let value: serde_json::Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(value["name"], "trainer");
        assert_eq!(value["fields"][0]["kind"], "primaryKey");
        assert_eq!(value["fields"][0]["type"], "INTEGER");
        assert_eq!(value["fields"][2]["references"], "pokemon");
        assert!(value["fields"][3].get("references").is_none());
    }

    #[test]
    fn test_yaml_export_round_trips() {
        let model = trainer();
        let result = DescriptorExporter::new(DescriptorFormat::Yaml)
            .consume(&model)
            .unwrap();
        assert_eq!(result.format, "yaml");

        let parsed: TableDescriptor = serde_yaml::from_str(&result.content).unwrap();
        assert_eq!(parsed, TableDescriptor::from_model(&model));
    }

    #[test]
    fn test_empty_model_rejected() {
        let model = Model::from_source(&InMemorySource::new("empty"), None).unwrap();
        let err = DescriptorExporter::default().consume(&model).unwrap_err();
        assert!(matches!(err, ExportError::EmptyModel(name) if name == "empty"));
    }
}
