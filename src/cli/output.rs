//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::CliError;
use owo_colors::OwoColorize;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &CliError) -> String {
    format!("{}: {}", e.category(), e)
}

/// Same as [`map_error`] with the category highlighted for a terminal.
pub fn map_error_colored(e: &CliError) -> String {
    format!("{}: {}", e.category().red().bold(), e)
}
