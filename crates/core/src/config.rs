// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recorder configuration.
//!
//! Defaults describe the convert2rhel conversion tool. A TOML file may
//! override any field; unknown keys are rejected.

use crate::sanitize::{sensitive_set, DEFAULT_SENSITIVE_OPTIONS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// What to do with other top-level keys when the results file is a valid
/// object that lacks the activities array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForeignKeys {
    /// Rebuild the file with only the activities array.
    #[default]
    Discard,
    /// Keep the other keys and add the activities array next to them.
    Preserve,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecorderConfig {
    /// Breadcrumbs file read by collection tooling
    pub results_path: PathBuf,
    /// Top-level key of the activities array
    pub array_key: String,
    /// Label for the kind of run being recorded
    pub activity: String,
    /// Installed package whose identity is recorded
    pub package_name: String,
    /// Environment variables with this prefix are captured
    pub env_prefix: String,
    /// File holding the OS identity string
    pub release_file: PathBuf,
    /// Package database query tool
    pub rpm_program: PathBuf,
    /// Options redacted in addition to [`DEFAULT_SENSITIVE_OPTIONS`]
    pub extra_sensitive_options: BTreeSet<String>,
    pub foreign_keys: ForeignKeys,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            results_path: PathBuf::from("/etc/migration-results"),
            array_key: "activities".to_string(),
            activity: "conversion".to_string(),
            package_name: "convert2rhel".to_string(),
            env_prefix: "CONVERT2RHEL_".to_string(),
            release_file: PathBuf::from("/etc/system-release"),
            rpm_program: PathBuf::from("rpm"),
            extra_sensitive_options: BTreeSet::new(),
            foreign_keys: ForeignKeys::default(),
        }
    }
}

impl RecorderConfig {
    /// Load from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        toml::from_str(&text).map_err(|source| ConfigError::Toml { path: path.to_path_buf(), source })
    }

    /// The full set of options whose values are redacted.
    ///
    /// The built-in options can be extended but never removed.
    pub fn sensitive_options(&self) -> BTreeSet<String> {
        let mut set = sensitive_set(DEFAULT_SENSITIVE_OPTIONS.iter().copied());
        set.extend(self.extra_sensitive_options.iter().cloned());
        set
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
