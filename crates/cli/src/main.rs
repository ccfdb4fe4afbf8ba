// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! crumbs: record a breadcrumb for a migration run, and show recorded ones

mod commands;
mod env;
mod exit_error;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crumbs_core::RecorderConfig;
use tracing_subscriber::EnvFilter;

use crate::commands::{run, show};
use crate::exit_error::ExitError;

#[derive(Parser)]
#[command(name = "crumbs", version = env::VERSION, about = "Migration breadcrumbs recorder")]
struct Cli {
    /// Config file (TOML) overriding the built-in defaults
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Results file to write to or read from
    #[arg(long, global = true, value_name = "PATH")]
    results_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program and record a breadcrumb of the run
    Run(run::RunArgs),
    /// Show recorded breadcrumbs
    Show(show::ShowArgs),
}

fn main() {
    let argv: Vec<String> =
        std::env::args_os().map(|arg| arg.to_string_lossy().into_owned()).collect();
    let cli = Cli::parse_from(&argv);
    init_logging();

    if let Err(e) = dispatch(cli, &argv) {
        let code = match e.downcast_ref::<ExitError>() {
            Some(exit) => {
                if !exit.message.is_empty() {
                    eprintln!("error: {}", exit.message);
                }
                exit.code
            }
            None => {
                eprintln!("error: {e:#}");
                1
            }
        };
        std::process::exit(code);
    }
}

fn dispatch(cli: Cli, argv: &[String]) -> Result<()> {
    let config = load_config(cli.config, cli.results_path)?;
    match cli.command {
        Commands::Run(args) => run::handle(args, config, argv),
        Commands::Show(args) => show::handle(args, &config),
    }
}

/// Built-in defaults, then the config file, then the results path override.
fn load_config(config: Option<PathBuf>, results_path: Option<PathBuf>) -> Result<RecorderConfig> {
    let mut loaded = match config.or_else(env::config_path) {
        Some(path) => RecorderConfig::load(&path)?,
        None => RecorderConfig::default(),
    };
    if let Some(path) = results_path.or_else(env::results_path) {
        loaded.results_path = path;
    }
    Ok(loaded)
}

fn init_logging() {
    let filter = EnvFilter::try_new(env::log_filter()).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
