// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn crumbs_help_shows_usage() {
    cli().args(&["--help"]).passes().stdout_has("Usage:").stdout_has("run").stdout_has("show");
}

#[test]
fn crumbs_run_help_shows_usage() {
    cli().args(&["run", "--help"]).passes().stdout_has("Usage:").stdout_has("COMMAND");
}

#[test]
fn crumbs_show_help_lists_output_formats() {
    cli().args(&["show", "--help"]).passes().stdout_has("--last").stdout_has("json");
}

#[test]
fn crumbs_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn crumbs_without_subcommand_fails() {
    cli().exits(2);
}

#[test]
fn crumbs_rejects_missing_config_file() {
    cli().args(&["--config", "/nonexistent/crumbs.toml", "show"]).exits(1).stderr_has("error:");
}
