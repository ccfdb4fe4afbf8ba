// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! OS identity snapshots.

use crate::AdapterError;
use std::path::{Path, PathBuf};

/// Reports the identity of the running OS.
///
/// Called once before and once after the migration; the two answers differ
/// when the migration changed the system.
pub trait OsIdentity {
    fn release(&self) -> Result<String, AdapterError>;
}

/// Reads the release file (e.g. `/etc/system-release`), without its trailing newline.
#[derive(Debug, Clone)]
pub struct ReleaseFile {
    path: PathBuf,
}

impl ReleaseFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OsIdentity for ReleaseFile {
    fn release(&self) -> Result<String, AdapterError> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|source| AdapterError::Read { path: self.path.clone(), source })?;
        Ok(content.trim().to_string())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::OsIdentity;
    use crate::AdapterError;
    use parking_lot::Mutex;
    use std::path::PathBuf;
    use std::sync::Arc;

    const FAKE_RELEASE_PATH: &str = "/etc/system-release";

    /// Fake OS identity whose answer can be changed mid-test
    #[derive(Clone)]
    pub struct FakeOsIdentity {
        release: Arc<Mutex<Option<String>>>,
        calls: Arc<Mutex<usize>>,
    }

    impl FakeOsIdentity {
        pub fn new(release: &str) -> Self {
            Self {
                release: Arc::new(Mutex::new(Some(release.to_string()))),
                calls: Arc::new(Mutex::new(0)),
            }
        }

        /// Simulate the system changing identity
        pub fn set(&self, release: &str) {
            *self.release.lock() = Some(release.to_string());
        }

        /// Make later reads fail as if the release file were unreadable
        pub fn make_unreadable(&self) {
            *self.release.lock() = None;
        }

        pub fn calls(&self) -> usize {
            *self.calls.lock()
        }
    }

    impl OsIdentity for FakeOsIdentity {
        fn release(&self) -> Result<String, AdapterError> {
            *self.calls.lock() += 1;
            self.release.lock().clone().ok_or_else(|| AdapterError::Read {
                path: PathBuf::from(FAKE_RELEASE_PATH),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeOsIdentity;

#[cfg(test)]
#[path = "os_release_tests.rs"]
mod tests;
