// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timestamp formatting for persisted breadcrumbs.
//!
//! Activity stamps are written as `2026-01-30T08:14:09.000000Z`: UTC,
//! microsecond precision, explicit `Z`. Parsing also accepts stamps without
//! a fractional part, which older writers emitted when microseconds were zero.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};

const WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";
const READ_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Format a stamp in the persisted layout.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(WRITE_FORMAT).to_string()
}

/// Parse a stamp written by [`format_timestamp`].
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, READ_FORMAT).map(|naive| naive.and_utc())
}

/// Drop sub-microsecond precision so a stamp survives a write/read cycle unchanged.
pub fn truncate_to_micros(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(6)
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
