//! Relationship validation functionality
//!
//! Validates the foreign keys between the models of a [`DataModel`]:
//! references to unknown models, self-references, referenced models without
//! a primary key, and circular dependencies.

use std::collections::HashMap;

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::NodeIndex;
use petgraph::{Directed, Graph};
use tracing::{debug, warn};

use crate::models::DataModel;

/// Result of relationship validation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RelationshipValidationResult {
    /// Foreign keys naming a model that is not in the data model
    pub dangling_references: Vec<DanglingReference>,
    /// Foreign keys pointing back at their own model
    pub self_references: Vec<SelfReference>,
    /// Foreign keys whose target model has no primary key
    pub missing_target_keys: Vec<MissingTargetKey>,
    /// Circular dependencies found
    pub circular_dependencies: Vec<CircularDependency>,
}

impl RelationshipValidationResult {
    /// Dangling references and cycles make a data model unusable for
    /// table generation; the other findings are informational
    pub fn has_errors(&self) -> bool {
        !self.dangling_references.is_empty() || !self.circular_dependencies.is_empty()
    }
}

/// Foreign key naming an unknown model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub model: String,
    pub column: String,
    pub target: String,
}

/// Foreign key referencing its own model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfReference {
    pub model: String,
    pub column: String,
}

/// Foreign key whose target model has no primary key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTargetKey {
    pub model: String,
    pub column: String,
    pub target: String,
}

/// Circular dependency detected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircularDependency {
    /// Names of the models on the cycle, sorted
    pub cycle_path: Vec<String>,
}

/// Error during relationship validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelationshipValidationError {
    #[error("Circular dependency involving model \"{0}\"")]
    CircularDependency(String),
    #[error("Column \"{column}\" of model \"{model}\" references unknown model \"{target}\"")]
    DanglingReference {
        model: String,
        column: String,
        target: String,
    },
}

impl From<DanglingReference> for RelationshipValidationError {
    fn from(reference: DanglingReference) -> Self {
        RelationshipValidationError::DanglingReference {
            model: reference.model,
            column: reference.column,
            target: reference.target,
        }
    }
}

/// Relationship validator
#[derive(Debug, Default)]
pub struct RelationshipValidator;

impl RelationshipValidator {
    /// Create a new relationship validator
    pub fn new() -> Self {
        Self
    }

    /// Validate every foreign key of every model
    pub fn validate(&self, data_model: &DataModel) -> RelationshipValidationResult {
        let mut result = RelationshipValidationResult::default();

        for model in data_model.models() {
            for (column, target) in model.foreign_key() {
                if target == model.name() {
                    result.self_references.push(SelfReference {
                        model: model.name().to_string(),
                        column: column.clone(),
                    });
                }

                match data_model.get(target) {
                    None => {
                        warn!(
                            "Model \"{}\" column \"{}\" references unknown model \"{}\"",
                            model.name(),
                            column,
                            target
                        );
                        result.dangling_references.push(DanglingReference {
                            model: model.name().to_string(),
                            column: column.clone(),
                            target: target.clone(),
                        });
                    }
                    Some(referenced) if referenced.primary_key().is_none() => {
                        result.missing_target_keys.push(MissingTargetKey {
                            model: model.name().to_string(),
                            column: column.clone(),
                            target: target.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        let graph = dependency_graph(data_model);
        for component in tarjan_scc(&graph) {
            if component.len() > 1 {
                let mut cycle_path: Vec<String> =
                    component.iter().map(|idx| graph[*idx].clone()).collect();
                cycle_path.sort();
                warn!("Circular dependency between models {:?}", cycle_path);
                result
                    .circular_dependencies
                    .push(CircularDependency { cycle_path });
            }
        }

        debug!(
            "Validated {} models: {} dangling, {} self, {} cycles",
            data_model.len(),
            result.dangling_references.len(),
            result.self_references.len(),
            result.circular_dependencies.len()
        );
        result
    }

    /// Model names ordered so every referenced model precedes the models
    /// referencing it
    ///
    /// Self-references and references to unknown models do not constrain
    /// the order.
    pub fn creation_order(
        &self,
        data_model: &DataModel,
    ) -> Result<Vec<String>, RelationshipValidationError> {
        let graph = dependency_graph(data_model);
        toposort(&graph, None)
            .map(|order| order.into_iter().map(|idx| graph[idx].clone()).collect())
            .map_err(|cycle| {
                RelationshipValidationError::CircularDependency(graph[cycle.node_id()].clone())
            })
    }
}

/// Directed graph with an edge referenced -> referencing for every foreign
/// key between two distinct known models
fn dependency_graph(data_model: &DataModel) -> Graph<String, String, Directed> {
    let mut graph = Graph::<String, String, Directed>::new();
    let mut node_map: HashMap<String, NodeIndex> = HashMap::new();

    for model in data_model.models() {
        let idx = graph.add_node(model.name().to_string());
        node_map.insert(model.name().to_string(), idx);
    }

    for model in data_model.models() {
        for (column, target) in model.foreign_key() {
            if target == model.name() {
                continue;
            }
            if let (Some(&from), Some(&to)) = (node_map.get(target), node_map.get(model.name())) {
                graph.add_edge(from, to, column.clone());
            }
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::InMemorySource;
    use crate::models::Model;

    fn model(name: &str, columns: &[&str]) -> Model {
        let source = columns
            .iter()
            .fold(InMemorySource::new(name), |source, column| {
                source.with_column(*column, "int64")
            });
        Model::from_source(&source, None).unwrap()
    }

    fn pokemon_and_trainer() -> DataModel {
        let mut pokemon = model("pokemon", &["id"]);
        pokemon.set_primary_key("id").unwrap();
        let mut trainer = model("trainer", &["id", "pokemon_id"]);
        trainer.set_primary_key("id").unwrap();
        trainer.set_foreign_key("pokemon_id", &pokemon).unwrap();

        let mut data_model = DataModel::new();
        // Referencing model first, so ordering has work to do
        data_model.add_model(trainer).unwrap();
        data_model.add_model(pokemon).unwrap();
        data_model
    }

    #[test]
    fn test_valid_references() {
        let result = RelationshipValidator::new().validate(&pokemon_and_trainer());
        assert!(!result.has_errors());
        assert_eq!(result, RelationshipValidationResult::default());
    }

    #[test]
    fn test_creation_order_puts_referenced_first() {
        let order = RelationshipValidator::new()
            .creation_order(&pokemon_and_trainer())
            .unwrap();
        assert_eq!(order, vec!["pokemon".to_string(), "trainer".to_string()]);
    }

    #[test]
    fn test_dangling_reference() {
        let mut trainer = model("trainer", &["id", "gym_id"]);
        trainer.set_foreign_key_by_name("gym_id", "gym").unwrap();
        let mut data_model = DataModel::new();
        data_model.add_model(trainer).unwrap();

        let result = RelationshipValidator::new().validate(&data_model);
        assert!(result.has_errors());
        assert_eq!(
            result.dangling_references,
            vec![DanglingReference {
                model: "trainer".to_string(),
                column: "gym_id".to_string(),
                target: "gym".to_string(),
            }]
        );
    }

    #[test]
    fn test_self_reference_and_missing_key() {
        let mut employee = model("employee", &["id", "manager_id"]);
        employee
            .set_foreign_key_by_name("manager_id", "employee")
            .unwrap();
        let mut data_model = DataModel::new();
        data_model.add_model(employee).unwrap();

        let validator = RelationshipValidator::new();
        let result = validator.validate(&data_model);
        assert!(!result.has_errors());
        assert_eq!(result.self_references.len(), 1);
        assert_eq!(result.missing_target_keys.len(), 1);
        assert_eq!(
            validator.creation_order(&data_model).unwrap(),
            vec!["employee".to_string()]
        );
    }

    #[test]
    fn test_circular_dependency() {
        let mut a = model("a", &["id", "b_id"]);
        let mut b = model("b", &["id", "a_id"]);
        a.set_foreign_key_by_name("b_id", "b").unwrap();
        b.set_foreign_key_by_name("a_id", "a").unwrap();
        let mut data_model = DataModel::new();
        data_model.add_model(a).unwrap();
        data_model.add_model(b).unwrap();

        let validator = RelationshipValidator::new();
        let result = validator.validate(&data_model);
        assert!(result.has_errors());
        assert_eq!(
            result.circular_dependencies,
            vec![CircularDependency {
                cycle_path: vec!["a".to_string(), "b".to_string()],
            }]
        );
        assert!(matches!(
            validator.creation_order(&data_model),
            Err(RelationshipValidationError::CircularDependency(_))
        ));
    }
}
