//! Presentation: text and JSON formatters for command results.

use crate::error::WizardError;
use crate::init::InitOutcome;
use crate::snapshot::ConfigurationSnapshot;
use crate::sync::SyncReport;
use comfy_table::Table;
use serde::Serialize;
use std::path::Path;

/// Result of a simulated generation run.
#[derive(Debug, Serialize)]
pub struct GenerationSummary {
    pub snapshot: ConfigurationSnapshot,
    pub items: Vec<ItemDecision>,
    pub sync: SyncReport,
}

#[derive(Debug, Serialize)]
pub struct ItemDecision {
    pub name: String,
    pub included: bool,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, WizardError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| WizardError::ConfigError(format!("Failed to render JSON: {}", e)))
}

fn snapshot_table(snapshot: &ConfigurationSnapshot) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec!["Install path".to_string(), snapshot.install_path().display().to_string()]);
    table.add_row(vec![
        "Game binaries path".to_string(),
        snapshot.game_bin_path().display().to_string(),
    ]);
    table.add_row(vec!["Output path".to_string(), snapshot.output_path().display().to_string()]);
    table.add_row(vec!["Minify".to_string(), snapshot.minify().to_string()]);
    table.add_row(vec!["Promote".to_string(), snapshot.promote().to_string()]);
    table.add_row(vec!["Version".to_string(), snapshot.version().to_string()]);
    table
}

pub fn format_snapshot(
    snapshot: &ConfigurationSnapshot,
    format: &str,
) -> Result<String, WizardError> {
    if format == "json" {
        return to_json(snapshot);
    }
    Ok(snapshot_table(snapshot).to_string())
}

pub fn format_generation_summary(
    summary: &GenerationSummary,
    format: &str,
) -> Result<String, WizardError> {
    if format == "json" {
        return to_json(summary);
    }

    let mut out = snapshot_table(&summary.snapshot).to_string();
    if !summary.items.is_empty() {
        out.push_str("\n\nItems:");
        for item in &summary.items {
            let mark = if item.included { "+" } else { "-" };
            out.push_str(&format!("\n  {} {}", mark, item.name));
        }
    }
    out.push_str(&format!(
        "\n\nCache file synced: {} ({} bytes)",
        summary.sync.target.display(),
        summary.sync.bytes_copied
    ));
    Ok(out)
}

pub fn format_init_outcome(outcome: &InitOutcome) -> String {
    match outcome {
        InitOutcome::Created(path) => format!("Created {}", path.display()),
        InitOutcome::Overwritten(path) => format!("Overwrote {}", path.display()),
        InitOutcome::Skipped(path) => format!(
            "Skipped {} (already exists; use --force to overwrite)",
            path.display()
        ),
    }
}

pub fn format_init_preview(path: &Path, exists: bool) -> String {
    if exists {
        format!("Config file already exists: {}", path.display())
    } else {
        format!("Would create: {}", path.display())
    }
}
