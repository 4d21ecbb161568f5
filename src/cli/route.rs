//! CLI route: single route table and run context. Dispatches to the context
//! registry and presentation.

use crate::cli::confirm::{confirm_destructive, Confirmer, TerminalConfirmer};
use crate::cli::parse::{warning_flag, Commands, ConfigCommands, ContextCommands};
use crate::cli::presentation::{
    format_context_list_json, format_context_list_text, format_context_show_json,
    format_context_show_text, format_version_text,
};
use crate::cli::command_name;
use crate::config::ConfigStore;
use crate::context::{ContextRegistry, ContextUpdate, NewContext};
use crate::error::{CliError, ConfigError};
use crate::logging::LoggingLevel;
use std::path::PathBuf;
use tracing::debug;

/// Output format accepted by list/show
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(value: &str) -> Result<Self, CliError> {
        match value {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::Usage(format!(
                "Invalid format: '{}'. Must be 'text' or 'json'",
                other
            ))),
        }
    }
}

/// Runtime context for CLI execution: the loaded configuration store and the
/// confirmation prompt used for contexts that carry the warning flag.
pub struct RunContext {
    store: ConfigStore,
    confirmer: Box<dyn Confirmer>,
    materialized_default: bool,
}

impl RunContext {
    /// Load the configuration at `config_path`. A missing file is replaced by
    /// the default document, which is written out immediately.
    pub fn new(config_path: PathBuf) -> Result<Self, CliError> {
        let mut store = ConfigStore::with_path(&config_path);
        let materialized_default = match store.load() {
            Ok(()) => false,
            Err(ConfigError::ConfigNotFound) => {
                store.set_default();
                store.save()?;
                true
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            store,
            confirmer: Box::new(TerminalConfirmer),
            materialized_default,
        })
    }

    /// Replace the interactive prompt.
    pub fn with_confirmer(mut self, confirmer: Box<dyn Confirmer>) -> Self {
        self.confirmer = confirmer;
        self
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Whether startup created the default configuration file
    pub fn materialized_default(&self) -> bool {
        self.materialized_default
    }

    /// Logging level stored in the loaded document
    pub fn document_logging_level(&self) -> Result<i64, CliError> {
        Ok(self.store.document()?.logging_level)
    }

    /// Execute a command and return its rendered output.
    pub fn execute(&mut self, command: &Commands) -> Result<String, CliError> {
        let name = command_name(command);
        debug!(command = %name, "Executing command");
        let result = self.execute_inner(command);
        if let Err(e) = &result {
            debug!(command = %name, error = %e, "Command failed");
        }
        result
    }

    fn execute_inner(&mut self, command: &Commands) -> Result<String, CliError> {
        match command {
            Commands::Config { command } => match command {
                ConfigCommands::Contexts { command } => self.handle_context_command(command),
                ConfigCommands::SetLoggingLevel { level } => self.handle_set_logging_level(*level),
            },
            Commands::Version => Ok(format_version_text(self.store.path())),
        }
    }

    fn handle_context_command(&mut self, command: &ContextCommands) -> Result<String, CliError> {
        match command {
            ContextCommands::Create {
                name,
                db_string,
                warning,
                no_warning,
                service_user,
                service_pass,
                root_user,
            } => {
                let context = NewContext {
                    name: name.clone(),
                    connection_string: db_string.clone(),
                    warning: warning_flag(*warning, *no_warning).unwrap_or(false),
                    service_user: service_user.clone(),
                    service_pass: service_pass.clone(),
                    root_user: root_user.clone(),
                };
                ContextRegistry::new(&mut self.store).create(context)?;
                Ok(format!("Context with name \"{}\" is created", name))
            }
            ContextCommands::List { format } => self.handle_context_list(format),
            ContextCommands::Show { name, format } => self.handle_context_show(name, format),
            ContextCommands::Set {
                name,
                new_name,
                db_string,
                warning,
                no_warning,
                service_user,
                service_pass,
                root_user,
            } => {
                let update = ContextUpdate {
                    new_name: new_name.clone(),
                    connection_string: db_string.clone(),
                    warning: warning_flag(*warning, *no_warning),
                    service_user: service_user.clone(),
                    service_pass: service_pass.clone(),
                    root_user: root_user.clone(),
                };
                if update.is_empty() {
                    return Err(CliError::Usage(format!(
                        "Nothing to update for context \"{}\"",
                        name
                    )));
                }
                ContextRegistry::new(&mut self.store).update(name, update)?;
                Ok(format!("Context with name \"{}\" is updated", name))
            }
            ContextCommands::Delete { name, force } => self.handle_context_delete(name, *force),
            ContextCommands::Current { format } => self.handle_context_current(format),
            ContextCommands::Use { name } => {
                ContextRegistry::new(&mut self.store).activate(name)?;
                Ok(format!("Now using \"{}\"", name))
            }
        }
    }

    fn handle_context_list(&mut self, format: &str) -> Result<String, CliError> {
        let format = OutputFormat::parse(format)?;
        let entries = ContextRegistry::new(&mut self.store).list()?;
        Ok(match format {
            OutputFormat::Text => format_context_list_text(&entries),
            OutputFormat::Json => format_context_list_json(&entries),
        })
    }

    fn handle_context_show(&mut self, name: &str, format: &str) -> Result<String, CliError> {
        let format = OutputFormat::parse(format)?;
        let is_active = self.store.document()?.is_active(name);
        let registry = ContextRegistry::new(&mut self.store);
        let record = registry.get(name)?;
        Ok(match format {
            OutputFormat::Text => format_context_show_text(record, is_active),
            OutputFormat::Json => format_context_show_json(record, is_active),
        })
    }

    fn handle_context_current(&mut self, format: &str) -> Result<String, CliError> {
        let format = OutputFormat::parse(format)?;
        let registry = ContextRegistry::new(&mut self.store);
        let record = registry.active()?;
        Ok(match format {
            OutputFormat::Text => format_context_show_text(record, true),
            OutputFormat::Json => format_context_show_json(record, true),
        })
    }

    fn handle_context_delete(&mut self, name: &str, force: bool) -> Result<String, CliError> {
        let mut registry = ContextRegistry::new(&mut self.store);
        let record = registry.get(name)?.clone();
        let is_active = registry.active().map(|a| a.name == name).unwrap_or(false);

        // The registry rejects the active context; skip the prompt for it.
        if !force && !is_active {
            confirm_destructive(&record, "Deleting it", self.confirmer.as_ref())?;
        }

        registry.delete(name)?;
        Ok(format!("Context with name \"{}\" is deleted", name))
    }

    fn handle_set_logging_level(&mut self, level: LoggingLevel) -> Result<String, CliError> {
        self.store.set_logging_level(level)?;
        Ok("Logging level set".to_string())
    }
}
