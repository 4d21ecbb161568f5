//! CLI domain: parse, route, help, output, confirmation, and presentation only.
//! Single route table dispatches to the context registry and config store.

mod confirm;
mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use confirm::{confirm_destructive, Confirmer, StaticConfirmer, TerminalConfirmer};
pub use help::command_name;
pub use output::{map_error, map_error_colored};
pub use parse::{warning_flag, Cli, Commands, ConfigCommands, ContextCommands};
pub use presentation::{
    format_context_list_json, format_context_list_text, format_context_show_json,
    format_context_show_text, format_version_text,
};
pub use route::RunContext;
