// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `crumbs run` records one breadcrumb per workload run.

use crate::prelude::*;

#[test]
fn successful_run_records_a_finished_breadcrumb() {
    let host = Host::installed();

    host.crumbs().args(&["run", "true"]).passes();

    let activities = host.activities();
    assert_eq!(activities.len(), 1);
    let crumb = &activities[0];
    assert_eq!(crumb["version"], "1");
    assert_eq!(crumb["activity"], "conversion");
    assert_eq!(crumb["packages"][0]["nevra"], NEVRA);
    assert_eq!(crumb["packages"][0]["signature"], "(none)");
    assert_eq!(crumb["success"], true);
    assert_eq!(crumb["source_os"], SOURCE_OS);
    assert_eq!(crumb["target_os"], SOURCE_OS);
    assert!(crumb["activity_started"].as_str().unwrap().ends_with('Z'));
    assert!(crumb["activity_ended"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn failed_run_keeps_exit_code_and_leaves_target_unset() {
    let host = Host::installed();

    host.crumbs().args(&["run", "--", "sh", "-c", "exit 3"]).exits(3);

    let crumb = &host.activities()[0];
    assert_eq!(crumb["success"], false);
    assert_eq!(crumb["target_os"], "null");
    assert_eq!(crumb["source_os"], SOURCE_OS);
}

#[test]
fn secrets_on_the_command_line_are_redacted() {
    let host = Host::installed();

    host.crumbs()
        .args(&["run", "--", "true", "--password", "hunter2", "--activationkey=abc123", "-y"])
        .passes();

    let executed = host.activities()[0]["executed"].as_str().unwrap().to_string();
    assert!(!executed.contains("hunter2"), "{executed}");
    assert!(!executed.contains("abc123"), "{executed}");
    assert!(executed.contains("--password *******"), "{executed}");
    assert!(executed.contains("--activationkey=******"), "{executed}");
    assert!(executed.contains("-y"), "{executed}");
}

#[test]
fn runs_append_in_order() {
    let host = Host::installed();

    host.crumbs().args(&["run", "true"]).passes();
    host.crumbs().args(&["run", "false"]).exits(1);

    let outcomes: Vec<Value> = host.activities().iter().map(|a| a["success"].clone()).collect();
    similar_asserts::assert_eq!(outcomes, vec![Value::from(true), Value::from(false)]);
}

#[test]
fn prefixed_environment_is_captured() {
    let host = Host::installed();

    host.crumbs()
        .env("CONVERT2RHEL_SKIP_CHECK", "1")
        .env("UNRELATED_VAR", "x")
        .args(&["run", "true"])
        .passes();

    let env = host.activities()[0]["env"].clone();
    assert_eq!(env["CONVERT2RHEL_SKIP_CHECK"], "1");
    assert!(env.get("UNRELATED_VAR").is_none());
}

#[test]
fn missing_package_aborts_before_running() {
    let host = Host::without_package();
    let marker = host.path("ran");

    host.crumbs()
        .args(&["run", "--", "touch", marker.to_str().unwrap()])
        .exits(2)
        .stderr_has("not installed");

    assert!(!marker.exists());
    assert!(!host.results_path().exists());
}

#[test]
fn unspawnable_workload_is_recorded_as_failure() {
    let host = Host::installed();

    host.crumbs().args(&["run", "/nonexistent/convert2rhel"]).exits(127);

    assert_eq!(host.activities()[0]["success"], false);
}

#[test]
fn unwritable_results_path_does_not_change_exit_code() {
    let host = Host::installed();
    let results = host.path("missing-dir/migration-results");

    host.crumbs()
        .args(&["--results-path", results.to_str().unwrap(), "run", "true"])
        .passes()
        .stderr_has("breadcrumb not recorded");
}

#[test]
fn results_path_from_environment_overrides_config() {
    let host = Host::installed();
    let results = host.path("elsewhere.json");

    host.crumbs().env("CRUMBS_RESULTS_PATH", &results).args(&["run", "true"]).passes();

    assert!(results.exists());
    assert!(!host.results_path().exists());
}

#[test]
fn malformed_results_are_preserved_and_a_fresh_document_appended() {
    let host = Host::installed();
    host.file("migration-results", "{ not json");

    host.crumbs().args(&["run", "true"]).passes();

    let text = std::fs::read_to_string(host.results_path()).unwrap();
    assert!(text.starts_with("{ not json\n"), "{text}");
    assert!(text.contains("\"activities\""), "{text}");
}

#[test]
fn unreadable_target_os_still_records_and_warns() {
    let host = Host::installed();
    let release = host.path("system-release");

    host.crumbs()
        .args(&["run", "--", "rm", release.to_str().unwrap()])
        .passes()
        .stderr_has("without target OS identity");

    let crumb = &host.activities()[0];
    assert_eq!(crumb["success"], true);
    assert_eq!(crumb["source_os"], SOURCE_OS);
    assert_eq!(crumb["target_os"], "null");
}
