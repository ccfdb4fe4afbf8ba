// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::record::BreadcrumbRecord;
use crate::time_fmt::truncate_to_micros;
use chrono::{DateTime, Utc};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for command lines and records.
pub mod strategies {
    use proptest::prelude::*;

    /// A single command-line token, occasionally with spaces or `=`.
    pub fn arb_token() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z0-9/._-]{1,16}",
            "--[a-z]{1,10}=[a-zA-Z0-9 ]{0,12}",
            "[a-zA-Z ]{1,12}",
        ]
    }

    pub fn arb_argv() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(arb_token(), 0..10)
    }
}

// ── Record fixtures ─────────────────────────────────────────────────────

/// A fully populated successful record stamped at `started`.
pub fn finished_record(started: DateTime<Utc>) -> BreadcrumbRecord {
    let started = truncate_to_micros(started);
    let mut record = BreadcrumbRecord::new("conversion");
    record.set_package(
        "convert2rhel-2.1.0-1.el8.noarch",
        "RSA/SHA256, Tue 10 Sep 2024 10:00:00 AM UTC, Key ID 199e2f91fd431d51",
    );
    record.executed = Some("/usr/bin/convert2rhel --password=****** -y".to_string());
    record.success = Some(true);
    record.activity_started = Some(started);
    record.activity_ended = Some(started + chrono::Duration::minutes(17));
    record.source_os = Some("CentOS Linux release 8.5.2111".to_string());
    record.target_os = Some("Red Hat Enterprise Linux release 8.5 (Ootpa)".to_string());
    record.env.insert("CONVERT2RHEL_OUTDATED_PACKAGE_CHECK_SKIP".to_string(), "1".to_string());
    record
}
