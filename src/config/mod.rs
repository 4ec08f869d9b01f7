//! Schema configuration files
//!
//! A TOML file lists the CSV sources to derive models from and the
//! constraints to layer on each of them:
//!
//! ```toml
//! [inference]
//! unknown_tag_policy = "strict"
//!
//! [csv]
//! delimiter = ","
//! sample_rows = 0
//!
//! [[models]]
//! source = "data/pokemon.csv"
//! name = "pokemon"
//! primary_key = "id"
//! unique = ["name"]
//!
//! [[models]]
//! source = "data/trainer.csv"
//! primary_key = "id"
//!
//! [models.foreign_keys]
//! pokemon_id = "pokemon"
//! ```
//!
//! Relative sources are resolved against the directory passed to
//! [`SchemaConfig::build`] (the config file's directory for
//! [`load_data_model`]).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail, ensure};
use serde::Deserialize;
use tracing::info;

use crate::import::{CsvOptions, CsvSource};
use crate::inference::{InferenceConfig, TypeInferencer, UnknownTagPolicy};
use crate::models::{DataModel, Model};
use crate::validation::RelationshipValidator;

/// Top-level schema configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    pub inference: InferenceSection,
    pub csv: CsvSection,
    pub models: Vec<ModelConfig>,
}

/// `[inference]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InferenceSection {
    pub unknown_tag_policy: UnknownTagPolicy,
}

/// `[csv]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CsvSection {
    pub delimiter: char,
    /// 0 = all rows
    pub sample_rows: usize,
}

impl Default for CsvSection {
    fn default() -> Self {
        Self {
            delimiter: ',',
            sample_rows: 0,
        }
    }
}

/// One `[[models]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    pub source: PathBuf,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub primary_key: Option<String>,
    #[serde(default)]
    pub unique: Vec<String>,
    /// Column name -> referenced model name
    #[serde(default)]
    pub foreign_keys: BTreeMap<String, String>,
}

impl SchemaConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse schema configuration")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn inference_config(&self) -> InferenceConfig {
        InferenceConfig::builder()
            .unknown_tag_policy(self.inference.unknown_tag_policy)
            .build()
    }

    pub fn csv_options(&self) -> Result<CsvOptions> {
        ensure!(
            self.csv.delimiter.is_ascii(),
            "CSV delimiter {:?} must be a single ASCII character",
            self.csv.delimiter
        );
        Ok(CsvOptions {
            delimiter: self.csv.delimiter as u8,
            sample_rows: self.csv.sample_rows,
        })
    }

    /// Derive every configured model and apply its constraints
    ///
    /// Constraints are applied primary key first, then unique columns, then
    /// foreign keys. Fails if any foreign key names a model that is not
    /// configured.
    pub fn build(&self, base_dir: impl AsRef<Path>) -> Result<DataModel> {
        let base_dir = base_dir.as_ref();
        let inferencer = TypeInferencer::with_config(self.inference_config());
        let options = self.csv_options()?;

        let mut data_model = DataModel::new();
        for model_config in &self.models {
            let model = build_model(model_config, base_dir, &inferencer, options)?;
            data_model.add_model(model)?;
        }

        let validation = RelationshipValidator::new().validate(&data_model);
        if let Some(dangling) = validation.dangling_references.first() {
            bail!(
                "Column \"{}\" of model \"{}\" references unknown model \"{}\"",
                dangling.column,
                dangling.model,
                dangling.target
            );
        }

        info!("Built data model with {} models", data_model.len());
        Ok(data_model)
    }
}

fn build_model(
    config: &ModelConfig,
    base_dir: &Path,
    inferencer: &TypeInferencer,
    options: CsvOptions,
) -> Result<Model> {
    let path = base_dir.join(&config.source);
    let source = CsvSource::from_path(&path).with_options(options);

    let mut model = Model::new();
    model
        .derive_with(&source, config.name.as_deref(), inferencer)
        .with_context(|| format!("Failed to derive model from {}", path.display()))?;

    if let Some(primary_key) = &config.primary_key {
        model
            .set_primary_key(primary_key)
            .with_context(|| format!("Model \"{}\": invalid primary key", model.name()))?;
    }
    for column in &config.unique {
        model
            .set_unique(column)
            .with_context(|| format!("Model \"{}\": invalid unique column", model.name()))?;
    }
    for (column, target) in &config.foreign_keys {
        model
            .set_foreign_key_by_name(column, target.clone())
            .with_context(|| format!("Model \"{}\": invalid foreign key", model.name()))?;
    }

    Ok(model)
}

/// Read a config file and build its data model, resolving sources relative
/// to the file's directory
pub fn load_data_model(path: impl AsRef<Path>) -> Result<DataModel> {
    let path = path.as_ref();
    let config = SchemaConfig::from_file(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    config.build(base_dir)
}
