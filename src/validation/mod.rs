//! Validation functionality
//!
//! Provides validation logic for:
//! - Relationship validation (unknown targets, self-references, circular dependencies)

pub mod relationships;

pub use relationships::{
    CircularDependency, DanglingReference, MissingTargetKey, RelationshipValidationError,
    RelationshipValidationResult, RelationshipValidator, SelfReference,
};
