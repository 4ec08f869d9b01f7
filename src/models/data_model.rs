//! DataModel - a named collection of models

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use super::model::Model;

/// Error while assembling a [`DataModel`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataModelError {
    #[error("Cannot add a model without a name")]
    UnnamedModel,
    #[error("Model \"{0}\" already exists")]
    DuplicateModel(String),
}

/// Ordered collection of finished models, keyed by model name
///
/// Foreign keys between models are resolved by name against this
/// collection (see [`RelationshipValidator`](crate::validation::RelationshipValidator)).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DataModel {
    models: Vec<Model>,
}

impl DataModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model; names must be non-empty and unique
    pub fn add_model(&mut self, model: Model) -> Result<(), DataModelError> {
        if model.name().is_empty() {
            return Err(DataModelError::UnnamedModel);
        }
        if self.contains(model.name()) {
            return Err(DataModelError::DuplicateModel(model.name().to_string()));
        }

        info!("Added model \"{}\" to data model", model.name());
        self.models.push(model);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|model| model.name() == name)
    }

    /// Mutable access for layering further constraints on a stored model
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Model> {
        self.models.iter_mut().find(|model| model.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Models in insertion order
    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::InMemorySource;

    fn model(name: &str) -> Model {
        Model::from_source(&InMemorySource::new(name).with_column("id", "int64"), None).unwrap()
    }

    #[test]
    fn test_add_and_get() {
        let mut data_model = DataModel::new();
        data_model.add_model(model("pokemon")).unwrap();
        data_model.add_model(model("trainer")).unwrap();

        assert_eq!(data_model.len(), 2);
        assert!(data_model.contains("trainer"));
        assert_eq!(data_model.get("pokemon").unwrap().name(), "pokemon");
        assert!(data_model.get("gym").is_none());
        let names: Vec<&str> = data_model.models().iter().map(Model::name).collect();
        assert_eq!(names, vec!["pokemon", "trainer"]);
    }

    #[test]
    fn test_duplicate_and_unnamed_rejected() {
        let mut data_model = DataModel::new();
        data_model.add_model(model("pokemon")).unwrap();

        assert_eq!(
            data_model.add_model(model("pokemon")),
            Err(DataModelError::DuplicateModel("pokemon".to_string()))
        );
        assert_eq!(
            data_model.add_model(Model::new()),
            Err(DataModelError::UnnamedModel)
        );
        assert_eq!(data_model.len(), 1);
    }

    #[test]
    fn test_get_mut_applies_constraints() {
        let mut data_model = DataModel::new();
        data_model.add_model(model("pokemon")).unwrap();
        data_model
            .get_mut("pokemon")
            .unwrap()
            .set_primary_key("id")
            .unwrap();

        let pokemon = data_model.get("pokemon").unwrap();
        assert_eq!(pokemon.primary_key().map(|c| c.name()), Some("id"));
    }
}
