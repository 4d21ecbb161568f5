//! Version presentation.

use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use std::path::Path;

pub fn format_version_text(config_path: Option<&Path>) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Component", "Value"]);
    table.add_row(vec![env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")]);
    let path = config_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not configured)".to_string());
    table.add_row(vec!["Configuration file".to_string(), path]);
    table.to_string()
}
