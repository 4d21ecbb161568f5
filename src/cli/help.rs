//! CLI command-name contract for logging spans.

use crate::cli::parse::{Commands, ConfigCommands, ContextCommands};

/// Command name string for log events (e.g. "config.contexts.create").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Config { command } => format!("config.{}", config_command_name(command)),
        Commands::Version => "version".to_string(),
    }
}

pub fn config_command_name(command: &ConfigCommands) -> String {
    match command {
        ConfigCommands::Contexts { command } => {
            format!("contexts.{}", context_command_name(command))
        }
        ConfigCommands::SetLoggingLevel { .. } => "set_logging_level".to_string(),
    }
}

pub fn context_command_name(command: &ContextCommands) -> &'static str {
    match command {
        ContextCommands::Create { .. } => "create",
        ContextCommands::List { .. } => "list",
        ContextCommands::Show { .. } => "show",
        ContextCommands::Set { .. } => "set",
        ContextCommands::Delete { .. } => "delete",
        ContextCommands::Current { .. } => "current",
        ContextCommands::Use { .. } => "use",
    }
}
