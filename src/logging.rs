//! Logging System
//!
//! Structured logging using the `tracing` crate. The threshold comes from the
//! `logging_level` stored in the configuration document and can be overridden
//! from the command line or with the `MULTITOOL_LOG` filter. Logs go to stderr
//! so command output on stdout stays clean.

use crate::error::CliError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt as layer_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable holding a full `EnvFilter` directive; wins over everything else
pub const LOG_FILTER_ENV: &str = "MULTITOOL_LOG";

/// Logging level as chosen on the command line and stored (as an integer) in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LoggingLevel {
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl LoggingLevel {
    /// Integer stored in the configuration document
    pub fn as_int(self) -> i64 {
        match self {
            LoggingLevel::Debug => 10,
            LoggingLevel::Info => 20,
            LoggingLevel::Warning => 30,
            LoggingLevel::Error => 40,
            LoggingLevel::Fatal => 50,
        }
    }

    /// Nearest level for a stored integer. Values between steps round up to
    /// the next coarser level.
    pub fn from_int(value: i64) -> Self {
        match value {
            i64::MIN..=10 => LoggingLevel::Debug,
            11..=20 => LoggingLevel::Info,
            21..=30 => LoggingLevel::Warning,
            31..=40 => LoggingLevel::Error,
            _ => LoggingLevel::Fatal,
        }
    }

    /// `tracing` has no fatal level; fatal maps to error.
    pub fn level_filter(self) -> LevelFilter {
        match self {
            LoggingLevel::Debug => LevelFilter::DEBUG,
            LoggingLevel::Info => LevelFilter::INFO,
            LoggingLevel::Warning => LevelFilter::WARN,
            LoggingLevel::Error | LoggingLevel::Fatal => LevelFilter::ERROR,
        }
    }
}

impl fmt::Display for LoggingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoggingLevel::Debug => "debug",
            LoggingLevel::Info => "info",
            LoggingLevel::Warning => "warning",
            LoggingLevel::Error => "error",
            LoggingLevel::Fatal => "fatal",
        };
        f.write_str(name)
    }
}

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Result<Self, CliError> {
        match value {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(CliError::Usage(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                other
            ))),
        }
    }
}

/// Resolved logging options
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    pub level: LoggingLevel,
    pub format: LogFormat,
    pub color: bool,
}

impl LoggingOptions {
    /// Resolve options from the document level and command-line overrides.
    ///
    /// `--verbose` forces debug; an explicit `--log-level` wins over both.
    pub fn resolve(
        document_level: i64,
        verbose: bool,
        level_override: Option<LoggingLevel>,
        format: LogFormat,
    ) -> Self {
        let mut level = LoggingLevel::from_int(document_level);
        if verbose {
            level = LoggingLevel::Debug;
        }
        if let Some(explicit) = level_override {
            level = explicit;
        }
        Self {
            level,
            format,
            color: stderr_is_terminal(),
        }
    }
}

/// ANSI colors only when stderr is attached to a terminal
pub fn stderr_is_terminal() -> bool {
    std::io::stderr().is_terminal()
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: LoggingLevel::Warning,
            format: LogFormat::Text,
            color: stderr_is_terminal(),
        }
    }
}

/// Initialize the global subscriber.
///
/// Priority order (highest to lowest):
/// 1. `MULTITOOL_LOG` environment filter
/// 2. Resolved [`LoggingOptions::level`]
pub fn init_logging(options: &LoggingOptions) -> Result<(), CliError> {
    let filter = build_env_filter(options);
    let base_subscriber = Registry::default().with(filter);

    let result = match options.format {
        LogFormat::Json => base_subscriber
            .with(
                layer_fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => base_subscriber
            .with(
                layer_fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(options.color)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| CliError::Settings(format!("Failed to initialize logging: {}", e)))
}

fn build_env_filter(options: &LoggingOptions) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_FILTER_ENV) {
        return filter;
    }
    EnvFilter::default().add_directive(options.level.level_filter().into())
}
