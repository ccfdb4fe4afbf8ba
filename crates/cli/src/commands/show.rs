// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Show recorded breadcrumbs.

use anyhow::Result;
use clap::Args;
use crumbs_core::RecorderConfig;
use crumbs_storage::{ArrayLog, LogContents};
use serde_json::Value;

use crate::exit_error::ExitError;
use crate::output::{print_entries, OutputFormat};

#[derive(Args)]
pub struct ShowArgs {
    /// Only show the most recent breadcrumb
    #[arg(long)]
    pub last: bool,

    #[arg(short = 'o', long = "output", value_enum, default_value_t)]
    pub output: OutputFormat,
}

pub fn handle(args: ShowArgs, config: &RecorderConfig) -> Result<()> {
    let log = ArrayLog::new(&config.results_path, config.array_key.as_str());
    let path = log.path().display();

    let entries = match log.read_entries()? {
        LogContents::Entries(entries) => entries,
        LogContents::Missing => {
            if args.output == OutputFormat::Text {
                println!("No breadcrumbs recorded at {path}");
                return Ok(());
            }
            Vec::new()
        }
        LogContents::NoKey => {
            if args.output == OutputFormat::Text {
                println!("{path} has no \"{}\" array", log.key());
                return Ok(());
            }
            Vec::new()
        }
        LogContents::Malformed { reason, len } => {
            return Err(ExitError::new(
                1,
                format!("{path} is malformed ({reason}); its {len} bytes were left untouched"),
            )
            .into());
        }
    };

    print_entries(&select(entries, args.last), args.output)
}

fn select(mut entries: Vec<Value>, last: bool) -> Vec<Value> {
    if last {
        entries.pop().into_iter().collect()
    } else {
        entries
    }
}

#[cfg(test)]
#[path = "show_tests.rs"]
mod tests;
