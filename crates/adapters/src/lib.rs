// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! crumbs-adapters: system collaborators for the breadcrumb recorder
//!
//! Each collaborator is a narrow trait with one system implementation and a
//! fake (behind the `test-support` feature) for tests in other crates.

pub mod environment;
pub mod os_release;
pub mod package;

use std::path::PathBuf;
use thiserror::Error;

pub use environment::{filter_prefixed, EnvironmentSource, ProcessEnvironment};
pub use os_release::{OsIdentity, ReleaseFile};
pub use package::{PackageDescriptor, PackageSource, RpmPackageSource};

#[cfg(any(test, feature = "test-support"))]
pub use environment::FakeEnvironment;
#[cfg(any(test, feature = "test-support"))]
pub use os_release::FakeOsIdentity;
#[cfg(any(test, feature = "test-support"))]
pub use package::FakePackageSource;

/// Errors from system collaborators
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed { program: String, status: String, stderr: String },
    #[error("unexpected {program} output: {line:?}")]
    Parse { program: String, line: String },
}
