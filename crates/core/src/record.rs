// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Breadcrumb record written once per migration-tool execution.
//!
//! A record starts with every field unset, is filled in two phases by the
//! recorder (early data, then outcome), and is appended to the results file
//! exactly once. It is never mutated after it has been persisted.

use crate::sentinel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version of the persisted schema. Bump when the JSON layout changes.
pub const SCHEMA_VERSION: &str = "1";

/// Value written for any field that has not been assigned.
pub const UNSET: &str = "null";

/// Package identity of the tool that produced the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageEntry {
    /// Name-Epoch-Version-Release-Architecture
    #[serde(default, with = "sentinel::text")]
    pub nevra: Option<String>,
    /// Signing identity as stored in the package database
    #[serde(default, with = "sentinel::text")]
    pub signature: Option<String>,
}

/// One persisted snapshot of a single tool execution.
///
/// Field order matches the on-disk layout consumed by collection tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbRecord {
    pub version: String,
    pub activity: String,
    /// Always exactly one entry: the running tool's own package.
    pub packages: Vec<PackageEntry>,
    /// Command line with secret option values redacted.
    #[serde(default, with = "sentinel::text")]
    pub executed: Option<String>,
    /// `None` until the run finishes.
    #[serde(default, with = "sentinel::flag")]
    pub success: Option<bool>,
    #[serde(default, with = "sentinel::timestamp")]
    pub activity_started: Option<DateTime<Utc>>,
    #[serde(default, with = "sentinel::timestamp")]
    pub activity_ended: Option<DateTime<Utc>>,
    #[serde(default, with = "sentinel::text")]
    pub source_os: Option<String>,
    /// Only set on success; the failure path leaves it unset.
    #[serde(default, with = "sentinel::text")]
    pub target_os: Option<String>,
    /// Tool-prefixed environment variables observed at startup.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Assigned by downstream integrators, never by this producer.
    #[serde(default, with = "sentinel::text")]
    pub run_id: Option<String>,
}

impl BreadcrumbRecord {
    /// A fresh record for `activity` with every field unset.
    pub fn new(activity: impl Into<String>) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            activity: activity.into(),
            packages: vec![PackageEntry::default()],
            executed: None,
            success: None,
            activity_started: None,
            activity_ended: None,
            source_os: None,
            target_os: None,
            env: BTreeMap::new(),
            run_id: None,
        }
    }

    /// The producing package's entry.
    pub fn package(&self) -> Option<&PackageEntry> {
        self.packages.first()
    }

    /// Record the producing package's identity, replacing any previous entry.
    pub fn set_package(&mut self, nevra: impl Into<String>, signature: impl Into<String>) {
        self.packages =
            vec![PackageEntry { nevra: Some(nevra.into()), signature: Some(signature.into()) }];
    }

    /// Whether the outcome has been decided.
    pub fn is_finalized(&self) -> bool {
        self.success.is_some()
    }

    /// Serialize for appending to the results file.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
