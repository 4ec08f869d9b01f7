//! End-to-end model tests: derive, constrain, hand off

use table_modelling_sdk::export::{SQLExporter, SchemaConsumer, TableDescriptor};
use table_modelling_sdk::import::{CsvSource, InMemorySource};
use table_modelling_sdk::inference::{InferenceError, TypeInferencer, known_tags};
use table_modelling_sdk::models::{
    Column, ColumnType, ConstraintKind, DataModel, Model, ModelError,
};
use table_modelling_sdk::validation::RelationshipValidator;

fn pokemon_model() -> Model {
    let source = CsvSource::from_bytes(
        "pokemon",
        "id,name,type\n1,Bulbasaur,grass\n4,Charmander,fire\n",
    );
    let mut model = Model::from_source(&source, Some("pokemon")).unwrap();
    model.set_primary_key("id").unwrap();
    model.set_unique("name").unwrap();
    model
}

fn trainer_source() -> InMemorySource {
    InMemorySource::new("data/trainer.csv")
        .with_column("id", "int64")
        .with_column("name", "object")
        .with_column("pokemon_id", "int64")
}

mod scenario_tests {
    use super::*;

    #[test]
    fn test_trainer_scenario() {
        let pokemon = pokemon_model();

        let mut trainer = Model::new();
        trainer.derive_from(&trainer_source(), Some("trainer")).unwrap();

        let types: Vec<ColumnType> = trainer.columns().iter().map(|c| c.column_type()).collect();
        assert_eq!(
            types,
            vec![ColumnType::Integer, ColumnType::String, ColumnType::Integer]
        );

        trainer.set_primary_key("id").unwrap();
        assert_eq!(trainer.primary_key().unwrap().name(), "id");

        trainer.set_unique("name").unwrap();
        assert_eq!(trainer.unique(), &[Column::new("name", ColumnType::String)]);

        trainer.set_foreign_key("pokemon_id", &pokemon).unwrap();
        assert_eq!(trainer.foreign_key().len(), 1);
        assert_eq!(trainer.foreign_key()["pokemon_id"], "pokemon");
    }

    #[test]
    fn test_hand_off_to_consumers() {
        let pokemon = pokemon_model();
        let mut trainer = Model::from_source(&trainer_source(), None).unwrap();
        trainer.set_primary_key("id").unwrap();
        trainer.set_unique("name").unwrap();
        trainer.set_foreign_key("pokemon_id", &pokemon).unwrap();

        let mut data_model = DataModel::new();
        data_model.add_model(trainer.clone()).unwrap();
        data_model.add_model(pokemon).unwrap();

        let validation = RelationshipValidator::new().validate(&data_model);
        assert!(!validation.has_errors());
        assert!(validation.missing_target_keys.is_empty());

        let sql = SQLExporter::new("postgres").consume(&trainer).unwrap().content;
        assert!(sql.contains("\"id\" INTEGER PRIMARY KEY"));
        assert!(sql.contains("\"name\" VARCHAR UNIQUE"));
        assert!(sql.contains("REFERENCES \"pokemon\""));

        let descriptor = TableDescriptor::from_model(&trainer);
        assert_eq!(descriptor.id, trainer.id());
        assert_eq!(
            descriptor.field("pokemon_id").unwrap().references.as_deref(),
            Some("pokemon")
        );
    }
}

mod constraint_tests {
    use super::*;

    #[test]
    fn test_fresh_derive_has_no_constraints() {
        let model = Model::from_source(&trainer_source(), None).unwrap();
        assert_eq!(model.columns().len(), 3);
        let names: Vec<&str> = model.columns().iter().map(Column::name).collect();
        assert_eq!(names, vec!["id", "name", "pokemon_id"]);
        assert!(model.unique().is_empty());
        assert!(model.primary_key().is_none());
        assert!(model.foreign_key().is_empty());
    }

    #[test]
    fn test_unique_twice_fails() {
        let mut model = Model::from_source(&trainer_source(), None).unwrap();
        model.set_unique("name").unwrap();
        assert_eq!(
            model.set_unique("name"),
            Err(ModelError::ConstraintAlreadySet {
                column: "name".to_string(),
                kind: ConstraintKind::Unique,
            })
        );
        assert_eq!(model.unique().len(), 1);
    }

    #[test]
    fn test_primary_key_reset_rules() {
        let mut model = Model::from_source(&trainer_source(), None).unwrap();
        model.set_primary_key("id").unwrap();
        assert!(matches!(
            model.set_primary_key("id"),
            Err(ModelError::ConstraintAlreadySet {
                kind: ConstraintKind::PrimaryKey,
                ..
            })
        ));
        model.set_primary_key("pokemon_id").unwrap();
        assert_eq!(model.primary_key().unwrap().name(), "pokemon_id");
    }

    #[test]
    fn test_foreign_key_overwrite() {
        let pokemon = pokemon_model();
        let digimon = Model::from_source(&InMemorySource::new("digimon"), None).unwrap();
        let mut model = Model::from_source(&trainer_source(), None).unwrap();

        model.set_foreign_key("pokemon_id", &pokemon).unwrap();
        model.set_foreign_key("pokemon_id", &digimon).unwrap();
        assert_eq!(model.foreign_key()["pokemon_id"], "digimon");
    }

    #[test]
    fn test_absent_column_never_mutates() {
        let pokemon = pokemon_model();
        let mut model = Model::from_source(&trainer_source(), None).unwrap();
        let before = model.clone();

        for result in [
            model.clone().set_unique("age"),
            model.clone().set_primary_key("age"),
            model.clone().set_foreign_key("age", &pokemon),
        ] {
            assert_eq!(result, Err(ModelError::ColumnNotFound("age".to_string())));
        }
        assert!(model.set_unique("age").is_err());
        assert!(model.set_primary_key("age").is_err());
        assert!(model.set_foreign_key("age", &pokemon).is_err());
        assert_eq!(model, before);
    }
}

mod inference_tests {
    use super::*;

    #[test]
    fn test_every_known_tag_maps() {
        let inferencer = TypeInferencer::new();
        assert!(known_tags().all(|tag| inferencer.infer(tag).is_ok()));
    }

    #[test]
    fn test_unsupported_tag_never_defaults() {
        let inferencer = TypeInferencer::new();
        for _ in 0..3 {
            assert_eq!(
                inferencer.infer("datetime64[ns]"),
                Err(InferenceError::UnsupportedType {
                    tag: "datetime64[ns]".to_string()
                })
            );
        }
    }
}
