// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::recorder::FinishedRecord;
use crumbs_adapters::AdapterError;
use crumbs_storage::LogError;
use thiserror::Error;

/// The tool's own package could not be identified unambiguously
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("package {name} is not installed")]
    NotInstalled { name: String },
    #[error("package {name} is installed {count} times")]
    Ambiguous { name: String, count: usize },
}

/// Errors from the recorder lifecycle
#[derive(Debug, Error)]
pub enum RecorderError {
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    #[error("failed to persist breadcrumb: {0}")]
    Persist(#[from] LogError),
    /// The breadcrumb was persisted, but without the target OS identity.
    #[error("breadcrumb recorded without target OS identity: {source}")]
    TargetUnread {
        finished: Box<FinishedRecord>,
        #[source]
        source: AdapterError,
    },
}
