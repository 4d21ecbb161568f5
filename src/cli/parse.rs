//! CLI parse: clap types for multitool. No behavior; definitions only.

use crate::logging::LoggingLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Multitool CLI - manage deployments of the data system through named contexts
#[derive(Parser, Debug)]
#[command(name = "multitool")]
#[command(about = "Manage multiple deployments of the data system through named contexts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides MULTITOOL_CONFIG_PATH and the default)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level for this invocation (overrides the configured level)
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LoggingLevel>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configuration for multitool
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Display version information
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Context management
    Contexts {
        #[command(subcommand)]
        command: ContextCommands,
    },
    /// Set the logging level stored in the configuration file
    SetLoggingLevel {
        #[arg(value_enum)]
        level: LoggingLevel,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContextCommands {
    /// Create a context
    Create {
        /// Name of the context
        name: String,
        /// Database connection string
        db_string: String,
        /// Ask for confirmation before destructive actions on this context
        #[arg(long, conflicts_with = "no_warning")]
        warning: bool,
        /// Do not ask for confirmation (default)
        #[arg(long = "no-warning")]
        no_warning: bool,
        /// Service user used when connecting to this deployment
        #[arg(long)]
        service_user: Option<String>,
        /// Password for the service user
        #[arg(long)]
        service_pass: Option<String>,
        /// Root user used for user administration
        #[arg(long)]
        root_user: Option<String>,
    },
    /// List configured contexts
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show one context
    Show {
        /// Name of the context
        name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Update a configured context
    Set {
        /// Name of the context to update
        name: String,
        /// New name for the context
        #[arg(long)]
        new_name: Option<String>,
        /// New database connection string
        #[arg(long)]
        db_string: Option<String>,
        /// Ask for confirmation before destructive actions on this context
        #[arg(long, conflicts_with = "no_warning")]
        warning: bool,
        /// Stop asking for confirmation
        #[arg(long = "no-warning")]
        no_warning: bool,
        /// Service user used when connecting to this deployment
        #[arg(long)]
        service_user: Option<String>,
        /// Password for the service user
        #[arg(long)]
        service_pass: Option<String>,
        /// Root user used for user administration
        #[arg(long)]
        root_user: Option<String>,
    },
    /// Delete a context
    Delete {
        /// Name of the context
        name: String,
        /// Skip confirmation for contexts marked with a warning
        #[arg(long)]
        force: bool,
    },
    /// Show the active context
    Current {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Activate a context
    Use {
        /// Name of the context to activate
        name: String,
    },
}

/// Collapse a `--warning` / `--no-warning` pair into an optional flag.
pub fn warning_flag(warning: bool, no_warning: bool) -> Option<bool> {
    match (warning, no_warning) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}
