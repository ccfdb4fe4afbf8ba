// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `crumbs show` reads breadcrumbs back.

use crate::prelude::*;

#[test]
fn show_without_results_says_so() {
    let host = Host::installed();
    host.crumbs().args(&["show"]).passes().stdout_has("No breadcrumbs");
}

#[test]
fn show_json_without_results_is_empty_array() {
    let host = Host::installed();
    let out = host.crumbs().args(&["show", "-o", "json"]).passes();
    let parsed: Value = serde_json::from_str(&out.stdout()).unwrap();
    similar_asserts::assert_eq!(parsed, Value::Array(Vec::new()));
}

#[test]
fn show_summarizes_recorded_runs() {
    let host = Host::installed();
    host.crumbs().args(&["run", "true"]).passes();
    host.crumbs().args(&["run", "false"]).exits(1);

    host.crumbs()
        .args(&["show"])
        .passes()
        .stdout_has("success")
        .stdout_has("failed")
        .stdout_has(NEVRA);
}

#[test]
fn show_last_prints_only_the_newest() {
    let host = Host::installed();
    host.crumbs().args(&["run", "true"]).passes();
    host.crumbs().args(&["run", "false"]).exits(1);

    let out = host.crumbs().args(&["show", "--last", "--output", "json"]).passes();
    let parsed: Vec<Value> = serde_json::from_str(&out.stdout()).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0]["success"], false);
}

#[test]
fn show_reports_malformed_results() {
    let host = Host::installed();
    host.file("migration-results", "{ not json");

    host.crumbs().args(&["show"]).exits(1).stderr_has("malformed");
    assert_eq!(std::fs::read_to_string(host.results_path()).unwrap(), "{ not json");
}
