// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;

/// Version shown by `--version`
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("CRUMBS_GIT_HASH"));

/// Default log filter when `CRUMBS_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "warn";

/// Config file path: `--config` > `CRUMBS_CONFIG` > none (built-in defaults)
pub fn config_path() -> Option<PathBuf> {
    std::env::var_os("CRUMBS_CONFIG").filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Results file override: `--results-path` > `CRUMBS_RESULTS_PATH` > config
pub fn results_path() -> Option<PathBuf> {
    std::env::var_os("CRUMBS_RESULTS_PATH").filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// `tracing` filter directive for stderr logging
pub fn log_filter() -> String {
    std::env::var("CRUMBS_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
