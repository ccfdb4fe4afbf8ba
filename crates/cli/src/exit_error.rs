// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! `crumbs run` exits with the wrapped program's status. Commands return
//! `ExitError` instead of calling `std::process::exit()` so that the
//! breadcrumb is always finished before the process ends.

use std::fmt;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    /// Printed to stderr unless empty
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Exit with `code` without printing anything
    pub fn silent(code: i32) -> Self {
        Self::new(code, "")
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}
