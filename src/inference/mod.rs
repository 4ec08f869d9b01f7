//! Column type inference
//!
//! Maps the raw type tags reported by a tabular data source (dtype names
//! such as `int64`, `float64` or `object`) onto the schema-level
//! [`ColumnType`](crate::models::ColumnType).
//!
//! ## Example
//!
//! ```rust
//! use table_modelling_sdk::inference::{InferenceConfig, TypeInferencer, UnknownTagPolicy};
//! use table_modelling_sdk::models::ColumnType;
//!
//! let inferencer = TypeInferencer::new();
//! assert_eq!(inferencer.infer("int64").unwrap(), ColumnType::Integer);
//! assert!(inferencer.infer("bool").is_err());
//!
//! let permissive = TypeInferencer::with_config(
//!     InferenceConfig::builder()
//!         .unknown_tag_policy(UnknownTagPolicy::Permissive)
//!         .build(),
//! );
//! assert_eq!(permissive.infer("bool").unwrap(), ColumnType::String);
//! ```

mod config;
mod error;
mod inferrer;

pub use config::{InferenceConfig, InferenceConfigBuilder, UnknownTagPolicy};
pub use error::InferenceError;
pub use inferrer::{TypeInferencer, known_tags};
