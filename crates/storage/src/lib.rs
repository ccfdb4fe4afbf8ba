// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! crumbs-storage: append-only JSON results file

mod array_log;

pub use array_log::{append_to_array, AppendOutcome, ArrayLog, LogContents, LogError};
