//! Error types for the multitool context and configuration manager.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration store and context registry errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found")]
    ConfigNotFound,

    #[error("Configuration file {path} is not valid: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("No configuration to save: {0}")]
    NoConfigToSave(String),

    #[error("Context with name \"{0}\" already exists")]
    DuplicateContext(String),

    #[error("Context with name \"{0}\" does not exist")]
    ContextNotFound(String),

    #[error("Invalid context name \"{0}\": a name must not be blank")]
    InvalidContextName(String),

    #[error("Cannot remove active context \"{0}\"")]
    CannotDeleteActiveContext(String),

    #[error("Active context \"{0}\" is not configured; the configuration file may have been edited by hand")]
    ActiveContextMissing(String),

    #[error("Configuration I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors at the hand-off to the downstream data library
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Service user credentials not set in context \"{0}\"")]
    CredentialsIncomplete(String),

    #[error("Root user not set in context \"{0}\"")]
    RootUserMissing(String),

    #[error("Data backend error: {0}")]
    Backend(String),
}

/// Errors surfaced by the command surface
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("Action not confirmed")]
    NoConfirmation,

    #[error("{0}")]
    Usage(String),

    #[error("Invalid runtime settings: {0}")]
    Settings(String),
}

impl CliError {
    /// Process exit status for this error. Each kind has its own status.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NoConfirmation => 1,
            CliError::Usage(_) => 2,
            CliError::Config(e) => match e {
                ConfigError::ConfigNotFound => 3,
                ConfigError::ConfigInvalid { .. } => 4,
                ConfigError::NoConfigToSave(_) => 5,
                ConfigError::DuplicateContext(_) => 6,
                ConfigError::ContextNotFound(_) => 7,
                ConfigError::CannotDeleteActiveContext(_) => 8,
                ConfigError::ActiveContextMissing(_) => 9,
                ConfigError::Io { .. } => 10,
                ConfigError::InvalidContextName(_) => 13,
            },
            CliError::Data(_) => 11,
            CliError::Settings(_) => 12,
        }
    }

    /// Short category label used as the message prefix on stderr.
    pub fn category(&self) -> &'static str {
        match self {
            CliError::Config(_) => "Configuration",
            CliError::Data(_) => "Data",
            CliError::NoConfirmation | CliError::Usage(_) | CliError::Settings(_) => "CLI error",
        }
    }
}

impl From<::config::ConfigError> for CliError {
    fn from(err: ::config::ConfigError) -> Self {
        CliError::Settings(err.to_string())
    }
}
