// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! crumbs-core: record model, argument sanitizer and shared configuration
//! for migration breadcrumbs.

pub mod clock;
pub mod config;
pub mod record;
pub mod sanitize;
mod sentinel;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, ForeignKeys, RecorderConfig};
pub use record::{BreadcrumbRecord, PackageEntry, SCHEMA_VERSION, UNSET};
pub use sanitize::{sanitize, sensitive_set, DEFAULT_SENSITIVE_OPTIONS};
pub use time_fmt::{format_timestamp, parse_timestamp, truncate_to_micros};
