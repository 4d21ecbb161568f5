//! Context registry: CRUD and activation over the store's document.
//!
//! Each mutating operation checks its preconditions and applies its change in
//! memory, then saves once. A rejected request never reaches disk, and a failed
//! save restores the in-memory document to its previous state.

use crate::config::{is_valid_context_name, ConfigStore, ConfigurationDocument, ContextRecord};
use crate::error::ConfigError;
use serde::Serialize;
use tracing::{debug, info};

/// Fields for a new context
#[derive(Debug, Clone, Default)]
pub struct NewContext {
    pub name: String,
    pub connection_string: String,
    pub warning: bool,
    pub service_user: Option<String>,
    pub service_pass: Option<String>,
    pub root_user: Option<String>,
}

impl NewContext {
    pub fn new(name: impl Into<String>, connection_string: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            connection_string: connection_string.into(),
            ..Default::default()
        }
    }

    fn into_record(self) -> ContextRecord {
        ContextRecord {
            name: self.name,
            connection_string: self.connection_string,
            warning: self.warning,
            service_user: self.service_user,
            service_pass: self.service_pass,
            root_user: self.root_user,
        }
    }
}

/// Partial update. `None` leaves a field untouched; `Some` replaces it, even
/// with an empty string.
#[derive(Debug, Clone, Default)]
pub struct ContextUpdate {
    pub new_name: Option<String>,
    pub connection_string: Option<String>,
    pub warning: Option<bool>,
    pub service_user: Option<String>,
    pub service_pass: Option<String>,
    pub root_user: Option<String>,
}

impl ContextUpdate {
    pub fn is_empty(&self) -> bool {
        self.new_name.is_none()
            && self.connection_string.is_none()
            && self.warning.is_none()
            && self.service_user.is_none()
            && self.service_pass.is_none()
            && self.root_user.is_none()
    }

    fn apply_to(self, record: &mut ContextRecord) {
        if let Some(name) = self.new_name {
            record.name = name;
        }
        if let Some(connection_string) = self.connection_string {
            record.connection_string = connection_string;
        }
        if let Some(warning) = self.warning {
            record.warning = warning;
        }
        if let Some(user) = self.service_user {
            record.service_user = Some(user);
        }
        if let Some(pass) = self.service_pass {
            record.service_pass = Some(pass);
        }
        if let Some(root) = self.root_user {
            record.root_user = Some(root);
        }
    }
}

/// One row of [`ContextRegistry::list`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextListEntry {
    pub record: ContextRecord,
    pub is_active: bool,
}

/// Registry operations over the document owned by a [`ConfigStore`].
///
/// Borrows the store for its lifetime and keeps no copy of the document.
pub struct ContextRegistry<'a> {
    store: &'a mut ConfigStore,
}

impl<'a> ContextRegistry<'a> {
    pub fn new(store: &'a mut ConfigStore) -> Self {
        Self { store }
    }

    /// Append a new context and persist.
    pub fn create(&mut self, context: NewContext) -> Result<(), ConfigError> {
        let name = context.name.clone();
        self.commit(|document| {
            if !is_valid_context_name(&context.name) {
                return Err(ConfigError::InvalidContextName(context.name));
            }
            if document.contains(&context.name) {
                return Err(ConfigError::DuplicateContext(context.name));
            }
            document.contexts.push(context.into_record());
            Ok(())
        })?;
        info!(context = %name, "Context created");
        Ok(())
    }

    /// All contexts in insertion order, with the active one flagged.
    pub fn list(&self) -> Result<Vec<ContextListEntry>, ConfigError> {
        let document = self.store.document()?;
        Ok(document
            .contexts
            .iter()
            .map(|record| ContextListEntry {
                record: record.clone(),
                is_active: document.is_active(&record.name),
            })
            .collect())
    }

    /// Look up one context by name.
    pub fn get(&self, name: &str) -> Result<&ContextRecord, ConfigError> {
        self.store
            .contexts_by_name()?
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::ContextNotFound(name.to_string()))
    }

    /// Apply a partial update and persist. Renaming the active context moves
    /// `active_context` along with it in the same save.
    pub fn update(&mut self, name: &str, update: ContextUpdate) -> Result<(), ConfigError> {
        self.commit(|document| {
            if !document.contains(name) {
                return Err(ConfigError::ContextNotFound(name.to_string()));
            }
            if let Some(new_name) = update.new_name.as_deref() {
                if !is_valid_context_name(new_name) {
                    return Err(ConfigError::InvalidContextName(new_name.to_string()));
                }
                if new_name != name && document.contains(new_name) {
                    return Err(ConfigError::DuplicateContext(new_name.to_string()));
                }
                if document.is_active(name) {
                    document.active_context = new_name.to_string();
                }
            }
            if let Some(record) = document.find_mut(name) {
                update.apply_to(record);
            }
            Ok(())
        })?;
        info!(context = %name, "Context updated");
        Ok(())
    }

    /// Remove a context and persist. The active context cannot be removed.
    pub fn delete(&mut self, name: &str) -> Result<(), ConfigError> {
        self.commit(|document| {
            if !document.contains(name) {
                return Err(ConfigError::ContextNotFound(name.to_string()));
            }
            if document.is_active(name) {
                return Err(ConfigError::CannotDeleteActiveContext(name.to_string()));
            }
            document.contexts.retain(|c| c.name != name);
            Ok(())
        })?;
        info!(context = %name, "Context deleted");
        Ok(())
    }

    /// Make `name` the active context and persist.
    pub fn activate(&mut self, name: &str) -> Result<(), ConfigError> {
        self.commit(|document| {
            if !document.contains(name) {
                return Err(ConfigError::ContextNotFound(name.to_string()));
            }
            document.active_context = name.to_string();
            Ok(())
        })?;
        info!(context = %name, "Context activated");
        Ok(())
    }

    /// The active context
    pub fn active(&self) -> Result<&ContextRecord, ConfigError> {
        self.store.active_context()
    }

    /// Run `mutate` against the document, then save. On a rejected request
    /// nothing is saved; on a failed save the previous document is restored.
    fn commit<F>(&mut self, mutate: F) -> Result<(), ConfigError>
    where
        F: FnOnce(&mut ConfigurationDocument) -> Result<(), ConfigError>,
    {
        let document = self.store.document_mut()?;
        let snapshot = document.clone();

        if let Err(e) = mutate(document) {
            *document = snapshot;
            debug!(error = %e, "Context operation rejected");
            return Err(e);
        }

        if let Err(e) = self.store.save() {
            if let Ok(document) = self.store.document_mut() {
                *document = snapshot;
            }
            return Err(e);
        }
        Ok(())
    }
}
