// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Breadcrumb recorder state machine: new → collected → finished.

use crate::error::{IdentityError, RecorderError};
use crumbs_adapters::{
    filter_prefixed, EnvironmentSource, OsIdentity, PackageDescriptor, PackageSource,
    ProcessEnvironment, ReleaseFile, RpmPackageSource,
};
use crumbs_core::{
    sanitize, truncate_to_micros, BreadcrumbRecord, Clock, RecorderConfig, SystemClock,
};
use crumbs_storage::{AppendOutcome, ArrayLog};
use chrono::{DateTime, Utc};

/// Collaborators the recorder reads from.
pub struct RecorderDeps<P, O, E, C> {
    pub packages: P,
    pub os: O,
    pub env: E,
    pub clock: C,
}

/// Collaborators backed by the running system
pub type SystemDeps = RecorderDeps<RpmPackageSource, ReleaseFile, ProcessEnvironment, SystemClock>;

impl SystemDeps {
    pub fn system(config: &RecorderConfig) -> Self {
        Self {
            packages: RpmPackageSource::new(&config.rpm_program),
            os: ReleaseFile::new(&config.release_file),
            env: ProcessEnvironment,
            clock: SystemClock,
        }
    }
}

/// Pick the single descriptor from a lookup, or say why there isn't one.
pub fn exactly_one(
    name: &str,
    candidates: Vec<PackageDescriptor>,
) -> Result<PackageDescriptor, IdentityError> {
    let count = candidates.len();
    let mut candidates = candidates.into_iter();
    match (candidates.next(), candidates.next()) {
        (Some(only), None) => Ok(only),
        (None, _) => Err(IdentityError::NotInstalled { name: name.to_string() }),
        (Some(_), Some(_)) => Err(IdentityError::Ambiguous { name: name.to_string(), count }),
    }
}

struct Inner<P, O, E, C> {
    config: RecorderConfig,
    deps: RecorderDeps<P, O, E, C>,
    record: BreadcrumbRecord,
}

impl<P, O, E, C: Clock> Inner<P, O, E, C> {
    fn stamp(&self) -> DateTime<Utc> {
        truncate_to_micros(self.deps.clock.now_utc())
    }
}

/// A recorder before any data has been collected.
pub struct BreadcrumbRecorder<P, O, E, C> {
    inner: Inner<P, O, E, C>,
}

/// A recorder holding early data, waiting for the run's outcome.
pub struct CollectedRecorder<P, O, E, C> {
    inner: Inner<P, O, E, C>,
}

/// A record that has been finalized and appended to the results file.
#[derive(Debug, Clone)]
pub struct FinishedRecord {
    record: BreadcrumbRecord,
    outcome: AppendOutcome,
}

impl<P, O, E, C> BreadcrumbRecorder<P, O, E, C>
where
    P: PackageSource,
    O: OsIdentity,
    E: EnvironmentSource,
    C: Clock,
{
    pub fn new(config: RecorderConfig, deps: RecorderDeps<P, O, E, C>) -> Self {
        let record = BreadcrumbRecord::new(config.activity.clone());
        Self { inner: Inner { config, deps, record } }
    }

    pub fn record(&self) -> &BreadcrumbRecord {
        &self.inner.record
    }

    /// Gather everything known before the workload runs.
    ///
    /// `argv` is the host's own invocation; option values listed in the
    /// config's sensitive set are redacted before they reach the record.
    pub fn collect_early_data<A: AsRef<str>>(
        self,
        argv: &[A],
    ) -> Result<CollectedRecorder<P, O, E, C>, RecorderError> {
        let mut inner = self.inner;
        let name = inner.config.package_name.clone();

        let package = exactly_one(&name, inner.deps.packages.installed(&name)?)?;
        inner.record.set_package(package.nevra(), package.signature());
        inner.record.executed = Some(sanitize(argv, &inner.config.sensitive_options()));
        inner.record.source_os = Some(inner.deps.os.release()?);
        inner.record.env = filter_prefixed(inner.deps.env.vars(), &inner.config.env_prefix);
        inner.record.activity_started = Some(inner.stamp());

        tracing::debug!(
            package = %package.nevra(),
            env_vars = inner.record.env.len(),
            "collected early breadcrumb data"
        );
        Ok(CollectedRecorder { inner })
    }
}

impl<P, O, E, C> CollectedRecorder<P, O, E, C>
where
    O: OsIdentity,
    C: Clock,
{
    pub fn record(&self) -> &BreadcrumbRecord {
        &self.inner.record
    }

    /// Record a successful run, including the OS identity after migration.
    ///
    /// When the target identity cannot be read the breadcrumb is still
    /// persisted with `target_os` unset, and the read failure is returned as
    /// [`RecorderError::TargetUnread`] carrying the finished record.
    pub fn finish_success(mut self) -> Result<FinishedRecord, RecorderError> {
        match self.inner.deps.os.release() {
            Ok(release) => {
                self.inner.record.target_os = Some(release);
                self.finish(true)
            }
            Err(source) => {
                let finished = self.finish(true)?;
                Err(RecorderError::TargetUnread { finished: Box::new(finished), source })
            }
        }
    }

    /// Record a failed run. The target OS identity stays unset.
    pub fn finish_fail(self) -> Result<FinishedRecord, RecorderError> {
        self.finish(false)
    }

    fn finish(self, success: bool) -> Result<FinishedRecord, RecorderError> {
        let mut inner = self.inner;
        let ended = inner.stamp();
        // Wall clocks can step backwards; keep started <= ended
        let ended = inner.record.activity_started.map_or(ended, |started| ended.max(started));
        inner.record.success = Some(success);
        inner.record.activity_ended = Some(ended);

        let log = ArrayLog::new(&inner.config.results_path, inner.config.array_key.as_str())
            .with_foreign_keys(inner.config.foreign_keys);
        let outcome = log.append(&inner.record)?;

        tracing::info!(
            path = %log.path().display(),
            success,
            outcome = ?outcome,
            "breadcrumb recorded"
        );
        Ok(FinishedRecord { record: inner.record, outcome })
    }
}

impl FinishedRecord {
    pub fn record(&self) -> &BreadcrumbRecord {
        &self.record
    }

    /// Which branch the results file append took
    pub fn outcome(&self) -> AppendOutcome {
        self.outcome
    }

    pub fn into_record(self) -> BreadcrumbRecord {
        self.record
    }
}

#[cfg(test)]
#[path = "recorder_tests.rs"]
mod tests;
