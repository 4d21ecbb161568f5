//! Multitool CLI Binary
//!
//! Command-line interface for managing deployment contexts.

use clap::Parser;
use multitool::cli::{map_error, map_error_colored, Cli, RunContext};
use multitool::config::expand_home;
use multitool::error::CliError;
use multitool::logging::{init_logging, stderr_is_terminal, LogFormat, LoggingOptions};
use multitool::settings::RuntimeSettings;
use std::process;
use tracing::{error, info, warn};

fn main() {
    let cli = Cli::parse();

    let settings = match RuntimeSettings::load() {
        Ok(settings) => settings.with_overrides(cli.config.clone(), cli.log_format.clone()),
        Err(e) => exit_with(&e),
    };
    let format = match LogFormat::parse(&settings.log_format) {
        Ok(format) => format,
        Err(e) => exit_with(&e),
    };

    let config_path = expand_home(&settings.config_path);
    let mut context = match RunContext::new(config_path) {
        Ok(ctx) => ctx,
        Err(e) => exit_with(&e),
    };

    // The configured level lives in the document, so logging starts after load.
    let logging_options = match build_logging_options(&cli, &context, format) {
        Ok(options) => options,
        Err(e) => exit_with(&e),
    };
    if let Err(e) = init_logging(&logging_options) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(e.exit_code());
    }

    if context.materialized_default() {
        warn!(
            path = %settings.config_path.display(),
            "Configuration file not found, default configuration created"
        );
    }

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            exit_with(&e);
        }
    }
}

fn exit_with(e: &CliError) -> ! {
    if stderr_is_terminal() {
        eprintln!("{}", map_error_colored(e));
    } else {
        eprintln!("{}", map_error(e));
    }
    process::exit(e.exit_code());
}

/// Build logging options from the loaded document and CLI flags.
/// Precedence: `--log-level` over `--verbose` over the document level.
fn build_logging_options(
    cli: &Cli,
    context: &RunContext,
    format: LogFormat,
) -> Result<LoggingOptions, CliError> {
    let document_level = context.document_logging_level()?;
    Ok(LoggingOptions::resolve(
        document_level,
        cli.verbose,
        cli.log_level,
        format,
    ))
}
