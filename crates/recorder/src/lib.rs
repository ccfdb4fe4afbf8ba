// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! crumbs-recorder: lifecycle of one migration breadcrumb
//!
//! The host constructs a [`BreadcrumbRecorder`], calls
//! [`BreadcrumbRecorder::collect_early_data`] before its workload and one of
//! [`CollectedRecorder::finish_success`] / [`CollectedRecorder::finish_fail`]
//! afterwards. Each step consumes the previous state, so finishing early or
//! twice does not compile.
//!
//! ```
//! # use crumbs_adapters::{FakeEnvironment, FakeOsIdentity, FakePackageSource};
//! # use crumbs_core::{FakeClock, RecorderConfig};
//! # use crumbs_recorder::{BreadcrumbRecorder, RecorderDeps};
//! # let dir = tempfile::tempdir().unwrap();
//! # let config = RecorderConfig {
//! #     results_path: dir.path().join("migration-results"),
//! #     ..RecorderConfig::default()
//! # };
//! # let deps = RecorderDeps {
//! #     packages: FakePackageSource::with_package("convert2rhel", "2.1.0", "1.el8"),
//! #     os: FakeOsIdentity::new("CentOS Linux release 8.5.2111"),
//! #     env: FakeEnvironment::new(&[]),
//! #     clock: FakeClock::new(),
//! # };
//! let recorder = BreadcrumbRecorder::new(config, deps);
//! let collected = recorder.collect_early_data(&["convert2rhel", "-y"]).unwrap();
//! let finished = collected.finish_fail().unwrap();
//! assert_eq!(finished.record().success, Some(false));
//! ```
//!
//! A collected recorder finishes once:
//!
//! ```compile_fail
//! # use crumbs_adapters::{FakeEnvironment, FakeOsIdentity, FakePackageSource};
//! # use crumbs_core::{FakeClock, RecorderConfig};
//! # use crumbs_recorder::{BreadcrumbRecorder, RecorderDeps};
//! # let dir = tempfile::tempdir().unwrap();
//! # let config = RecorderConfig {
//! #     results_path: dir.path().join("migration-results"),
//! #     ..RecorderConfig::default()
//! # };
//! # let deps = RecorderDeps {
//! #     packages: FakePackageSource::with_package("convert2rhel", "2.1.0", "1.el8"),
//! #     os: FakeOsIdentity::new("CentOS Linux release 8.5.2111"),
//! #     env: FakeEnvironment::new(&[]),
//! #     clock: FakeClock::new(),
//! # };
//! let collected = BreadcrumbRecorder::new(config, deps)
//!     .collect_early_data(&["convert2rhel"])
//!     .unwrap();
//! let _ = collected.finish_fail();
//! let _ = collected.finish_fail();
//! ```
//!
//! and only after early data has been collected:
//!
//! ```compile_fail
//! # use crumbs_adapters::{FakeEnvironment, FakeOsIdentity, FakePackageSource};
//! # use crumbs_core::{FakeClock, RecorderConfig};
//! # use crumbs_recorder::{BreadcrumbRecorder, RecorderDeps};
//! # let dir = tempfile::tempdir().unwrap();
//! # let config = RecorderConfig {
//! #     results_path: dir.path().join("migration-results"),
//! #     ..RecorderConfig::default()
//! # };
//! # let deps = RecorderDeps {
//! #     packages: FakePackageSource::with_package("convert2rhel", "2.1.0", "1.el8"),
//! #     os: FakeOsIdentity::new("CentOS Linux release 8.5.2111"),
//! #     env: FakeEnvironment::new(&[]),
//! #     clock: FakeClock::new(),
//! # };
//! let _ = BreadcrumbRecorder::new(config, deps).finish_success();
//! ```

mod error;
mod recorder;

pub use error::{IdentityError, RecorderError};
pub use recorder::{
    exactly_one, BreadcrumbRecorder, CollectedRecorder, FinishedRecord, RecorderDeps, SystemDeps,
};
