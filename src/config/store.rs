//! YAML-backed store for the configuration document.
//!
//! The store is the only component that touches the file on disk. It holds the
//! single in-memory [`ConfigurationDocument`] for the process; callers mutate
//! it through the context registry and persist explicitly with [`ConfigStore::save`].

use super::paths::expand_home;
use super::{ConfigurationDocument, ContextRecord};
use crate::error::ConfigError;
use crate::logging::LoggingLevel;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Loads, validates and saves the configuration document.
#[derive(Debug, Default)]
pub struct ConfigStore {
    path: Option<PathBuf>,
    document: Option<ConfigurationDocument>,
}

impl ConfigStore {
    /// Create a store with no path and no document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store configured for `path`
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        let mut store = Self::new();
        store.configure(path);
        store
    }

    /// Record the file to use. Expands a leading `~`; performs no I/O.
    pub fn configure(&mut self, path: impl AsRef<Path>) {
        self.path = Some(expand_home(path));
    }

    /// Configured file path, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read and validate the configured file, replacing the in-memory document.
    pub fn load(&mut self) -> Result<(), ConfigError> {
        let path = self.path.as_ref().ok_or(ConfigError::ConfigNotFound)?;

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(ConfigError::ConfigNotFound),
            Err(e) => {
                return Err(ConfigError::Io {
                    path: path.clone(),
                    source: e,
                })
            }
        };

        let document: ConfigurationDocument =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        document
            .validate()
            .map_err(|reason| ConfigError::ConfigInvalid {
                path: path.clone(),
                reason,
            })?;

        debug!(
            config_path = %path.display(),
            contexts = document.contexts.len(),
            active_context = %document.active_context,
            "Loaded configuration"
        );
        self.document = Some(document);
        Ok(())
    }

    /// Serialize the in-memory document to the configured file, overwriting it.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| ConfigError::NoConfigToSave("no configuration path set".to_string()))?;
        let document = self
            .document
            .as_ref()
            .ok_or_else(|| ConfigError::NoConfigToSave("configuration not set yet".to_string()))?;

        let yaml = serde_yaml::to_string(document).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: std::io::Error::new(ErrorKind::InvalidData, e),
        })?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }
        std::fs::write(path, yaml).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        debug!(config_path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Replace the in-memory document with the default one.
    pub fn set_default(&mut self) {
        self.document = Some(ConfigurationDocument::default());
    }

    /// Whether a document is held in memory
    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// The full document
    pub fn document(&self) -> Result<&ConfigurationDocument, ConfigError> {
        self.document.as_ref().ok_or(ConfigError::ConfigNotFound)
    }

    /// Mutable access for the context registry
    pub(crate) fn document_mut(&mut self) -> Result<&mut ConfigurationDocument, ConfigError> {
        self.document.as_mut().ok_or(ConfigError::ConfigNotFound)
    }

    /// Contexts keyed by name, built from the current document
    pub fn contexts_by_name(&self) -> Result<BTreeMap<&str, &ContextRecord>, ConfigError> {
        Ok(self
            .document()?
            .contexts
            .iter()
            .map(|c| (c.name.as_str(), c))
            .collect())
    }

    /// Resolve the active context through the name mapping
    pub fn active_context(&self) -> Result<&ContextRecord, ConfigError> {
        let document = self.document()?;
        self.contexts_by_name()?
            .get(document.active_context.as_str())
            .copied()
            .ok_or_else(|| ConfigError::ActiveContextMissing(document.active_context.clone()))
    }

    /// Set the global logging level and persist
    pub fn set_logging_level(&mut self, level: LoggingLevel) -> Result<(), ConfigError> {
        let document = self.document_mut()?;
        let previous = document.logging_level;
        document.logging_level = level.as_int();
        if let Err(e) = self.save() {
            if let Some(document) = self.document.as_mut() {
                document.logging_level = previous;
            }
            return Err(e);
        }
        info!(level = %level, "Logging level set");
        Ok(())
    }
}
