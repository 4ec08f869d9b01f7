//! Models module for the SDK
//!
//! Defines the schema structures built from tabular sources: columns with
//! inferred types, the per-table [`Model`] with its constraints, and the
//! [`DataModel`] collecting several models.

pub mod column;
pub mod data_model;
pub mod enums;
pub mod error;
pub mod model;
pub mod shared;

pub use column::Column;
pub use data_model::{DataModel, DataModelError};
pub use enums::*;
pub use error::ModelError;
pub use model::{ColumnConstraints, Model};
pub use shared::SharedModel;
