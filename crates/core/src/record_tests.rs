// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::time_fmt::parse_timestamp;
use serde_json::json;

#[test]
fn new_record_writes_every_field_as_unset() {
    let record = BreadcrumbRecord::new("conversion");
    let value = record.to_value().unwrap();

    assert_eq!(
        value,
        json!({
            "version": "1",
            "activity": "conversion",
            "packages": [{"nevra": "null", "signature": "null"}],
            "executed": "null",
            "success": "null",
            "activity_started": "null",
            "activity_ended": "null",
            "source_os": "null",
            "target_os": "null",
            "env": {},
            "run_id": "null",
        })
    );
}

#[test]
fn field_order_matches_persisted_layout() {
    let record = BreadcrumbRecord::new("conversion");
    let value = record.to_value().unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        [
            "version",
            "activity",
            "packages",
            "executed",
            "success",
            "activity_started",
            "activity_ended",
            "source_os",
            "target_os",
            "env",
            "run_id",
        ]
    );
}

#[test]
fn finished_record_round_trips_exactly() {
    let mut record = BreadcrumbRecord::new("conversion");
    record.set_package("convert2rhel-2.1.0-1.el9.noarch", "RSA/SHA256, Key ID 199e2f91fd431d51");
    record.executed = Some("/usr/bin/convert2rhel -p ****** -y".to_string());
    record.success = Some(true);
    record.activity_started = Some(parse_timestamp("2026-01-30T08:14:09.123456Z").unwrap());
    record.activity_ended = Some(parse_timestamp("2026-01-30T08:44:10.000001Z").unwrap());
    record.source_os = Some("CentOS Linux release 7.9.2009 (Core)".to_string());
    record.target_os = Some("Red Hat Enterprise Linux Server release 7.9 (Maipo)".to_string());
    record.env.insert("CONVERT2RHEL_DEBUG".to_string(), "1".to_string());

    let text = serde_json::to_string(&record).unwrap();
    let back: BreadcrumbRecord = serde_json::from_str(&text).unwrap();

    assert_eq!(back, record);
    assert!(text.contains("\"activity_started\":\"2026-01-30T08:14:09.123456Z\""));
    assert!(text.contains("\"run_id\":\"null\""));
}

#[test]
fn success_false_is_a_real_boolean() {
    let mut record = BreadcrumbRecord::new("conversion");
    record.success = Some(false);
    assert_eq!(record.to_value().unwrap()["success"], json!(false));
}

#[test]
fn reader_accepts_json_null_and_missing_fields() {
    let back: BreadcrumbRecord = serde_json::from_value(json!({
        "version": "1",
        "activity": "conversion",
        "packages": [{"nevra": null, "signature": "null"}],
        "success": null,
        "activity_started": "2026-01-30T08:14:09Z",
    }))
    .unwrap();

    assert_eq!(back.package(), Some(&PackageEntry::default()));
    assert_eq!(back.success, None);
    assert_eq!(back.activity_started, Some(parse_timestamp("2026-01-30T08:14:09Z").unwrap()));
    assert!(back.env.is_empty());
    assert_eq!(back.run_id, None);
}

#[test]
fn reader_rejects_non_boolean_success() {
    let err = serde_json::from_value::<BreadcrumbRecord>(json!({
        "version": "1",
        "activity": "conversion",
        "packages": [],
        "success": "yes",
    }))
    .unwrap_err();
    assert!(err.to_string().contains("expected a boolean"), "{err}");
}

#[test]
fn set_package_replaces_the_single_entry() {
    let mut record = BreadcrumbRecord::new("conversion");
    record.set_package("a-1-1.noarch", "(none)");
    record.set_package("b-1-1.noarch", "(none)");
    assert_eq!(record.packages.len(), 1);
    assert_eq!(record.package().and_then(|p| p.nevra.as_deref()), Some("b-1-1.noarch"));
}

#[test]
fn finalized_only_once_outcome_is_known() {
    let mut record = BreadcrumbRecord::new("conversion");
    assert!(!record.is_finalized());
    record.success = Some(false);
    assert!(record.is_finalized());
}
