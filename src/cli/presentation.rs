//! CLI presentation: text and json formatters per command family.

mod context;
mod version;

pub use context::{
    format_context_list_json, format_context_list_text, format_context_show_json,
    format_context_show_text,
};
pub use version::format_version_text;
