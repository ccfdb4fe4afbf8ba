// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process environment snapshots.

use std::collections::BTreeMap;

/// Provides the full process environment.
pub trait EnvironmentSource {
    fn vars(&self) -> Vec<(String, String)>;
}

/// The real process environment. Variables whose name or value is not
/// valid UTF-8 are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl EnvironmentSource for ProcessEnvironment {
    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}

/// Keep only variables whose name starts with `prefix`.
pub fn filter_prefixed(
    vars: impl IntoIterator<Item = (String, String)>,
    prefix: &str,
) -> BTreeMap<String, String> {
    vars.into_iter().filter(|(name, _)| name.starts_with(prefix)).collect()
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::EnvironmentSource;

    /// Fixed environment for testing
    #[derive(Clone, Default)]
    pub struct FakeEnvironment {
        vars: Vec<(String, String)>,
    }

    impl FakeEnvironment {
        pub fn new(vars: &[(&str, &str)]) -> Self {
            Self { vars: vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect() }
        }
    }

    impl EnvironmentSource for FakeEnvironment {
        fn vars(&self) -> Vec<(String, String)> {
            self.vars.clone()
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeEnvironment;

#[cfg(test)]
#[path = "environment_tests.rs"]
mod tests;
