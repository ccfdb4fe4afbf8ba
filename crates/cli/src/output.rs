// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use crumbs_core::{format_timestamp, BreadcrumbRecord};
use serde_json::Value;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One line per breadcrumb: start time, outcome, package, command line.
///
/// Entries written by other producers that don't match the record layout
/// are shown as raw JSON.
pub fn summarize(entry: &Value) -> String {
    let Ok(record) = serde_json::from_value::<BreadcrumbRecord>(entry.clone()) else {
        return format!("unreadable entry: {entry}");
    };
    let started = record.activity_started.map_or_else(|| "-".to_string(), |t| format_timestamp(&t));
    let outcome = match record.success {
        Some(true) => "success",
        Some(false) => "failed",
        None => "unknown",
    };
    let nevra = record.package().and_then(|p| p.nevra.as_deref()).unwrap_or("-");
    let executed = record.executed.as_deref().unwrap_or("-");
    format!("{started}  {outcome:<8} {nevra}  {executed}")
}

pub fn print_entries(entries: &[Value], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for entry in entries {
                println!("{}", summarize(entry));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(entries)?);
        }
    }
    Ok(())
}
