//! Thread-safe model handle
//!
//! [`Model`] has no internal synchronisation. Callers that share one model
//! across threads go through [`SharedModel`], which serialises derivation
//! and the constraint operations behind a single `RwLock`.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::error::ModelError;
use super::model::Model;
use crate::import::TabularSource;
use crate::inference::TypeInferencer;

/// Cloneable, lock-protected handle to a [`Model`]
#[derive(Debug, Clone, Default)]
pub struct SharedModel {
    inner: Arc<RwLock<Model>>,
}

impl SharedModel {
    pub fn new(model: Model) -> Self {
        Self {
            inner: Arc::new(RwLock::new(model)),
        }
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, Model>, ModelError> {
        self.inner.read().map_err(|_| ModelError::LockPoisoned)
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, Model>, ModelError> {
        self.inner.write().map_err(|_| ModelError::LockPoisoned)
    }

    /// Run `f` under the read lock
    pub fn read<T>(&self, f: impl FnOnce(&Model) -> T) -> Result<T, ModelError> {
        let guard = self.read_guard()?;
        Ok(f(&*guard))
    }

    /// Clone the current state
    pub fn snapshot(&self) -> Result<Model, ModelError> {
        self.read(Model::clone)
    }

    pub fn derive_from<S>(&self, source: &S, name: Option<&str>) -> Result<(), ModelError>
    where
        S: TabularSource + ?Sized,
    {
        self.write_guard()?.derive_from(source, name)
    }

    pub fn derive_with<S>(
        &self,
        source: &S,
        name: Option<&str>,
        inferencer: &TypeInferencer,
    ) -> Result<(), ModelError>
    where
        S: TabularSource + ?Sized,
    {
        self.write_guard()?.derive_with(source, name, inferencer)
    }

    pub fn set_unique(&self, column_name: &str) -> Result<(), ModelError> {
        self.write_guard()?.set_unique(column_name)
    }

    pub fn set_primary_key(&self, column_name: &str) -> Result<(), ModelError> {
        self.write_guard()?.set_primary_key(column_name)
    }

    /// Reference another model by name; `referenced` is read before this
    /// handle is locked, so a model may reference itself without deadlock
    pub fn set_foreign_key(
        &self,
        column_name: &str,
        referenced: &SharedModel,
    ) -> Result<(), ModelError> {
        let referenced_name = referenced.read(|model| model.name().to_string())?;
        self.write_guard()?.set_foreign_key_by_name(column_name, referenced_name)
    }
}

impl From<Model> for SharedModel {
    fn from(model: Model) -> Self {
        Self::new(model)
    }
}
