//! Context command presentation: list and show, text and json.

use crate::config::ContextRecord;
use crate::context::ContextListEntry;
use crate::data::CredentialStatus;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::json;

fn marker(flag: bool) -> &'static str {
    if flag {
        "*"
    } else {
        ""
    }
}

pub fn format_context_list_text(entries: &[ContextListEntry]) -> String {
    if entries.is_empty() {
        return "No contexts configured.\n\nUse 'multitool config contexts create' to add one."
            .to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec![
        "*",
        "Name",
        "Database string",
        "Warning",
        "Service user",
        "Root user",
    ]);
    for entry in entries {
        let record = &entry.record;
        table.add_row(vec![
            marker(entry.is_active).to_string(),
            record.name.clone(),
            record.masked_connection_string(),
            marker(record.warning).to_string(),
            record.service_user.clone().unwrap_or_default(),
            record.root_user.clone().unwrap_or_default(),
        ]);
    }
    table.to_string()
}

pub fn format_context_list_json(entries: &[ContextListEntry]) -> String {
    let contexts: Vec<_> = entries
        .iter()
        .map(|entry| {
            let record = &entry.record;
            json!({
                "name": record.name,
                "active": entry.is_active,
                "db_string": record.masked_connection_string(),
                "warning": record.warning,
                "service_user": record.service_user,
                "root_user": record.root_user,
            })
        })
        .collect();
    let out = json!({ "contexts": contexts, "total": entries.len() });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_context_show_text(record: &ContextRecord, is_active: bool) -> String {
    let mut output = format!("Context: {}\n", record.name);
    output.push_str(&format!("Active: {}\n", if is_active { "yes" } else { "no" }));
    output.push_str(&format!(
        "Database string: {}\n",
        record.masked_connection_string()
    ));
    output.push_str(&format!(
        "Warning: {}\n",
        if record.warning { "yes" } else { "no" }
    ));
    output.push_str(&format!(
        "Service user: {}\n",
        record.service_user.as_deref().unwrap_or("(not set)")
    ));
    output.push_str(&format!(
        "Service credentials: {}\n",
        CredentialStatus::of(record).describe()
    ));
    output.push_str(&format!(
        "Root user: {}\n",
        record.root_user.as_deref().unwrap_or("(not set)")
    ));
    output
}

pub fn format_context_show_json(record: &ContextRecord, is_active: bool) -> String {
    let out = json!({
        "name": record.name,
        "active": is_active,
        "db_string": record.masked_connection_string(),
        "warning": record.warning,
        "service_user": record.service_user,
        "service_credentials": CredentialStatus::of(record),
        "root_user": record.root_user,
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}
