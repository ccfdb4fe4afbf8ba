// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Installed-package lookup.

use crate::AdapterError;
use std::path::PathBuf;
use std::process::Command;

/// An installed package as reported by the package database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub name: String,
    /// `None` when the package has no epoch
    pub epoch: Option<String>,
    pub version: String,
    pub release: String,
    pub arch: String,
    /// Signing summary, `(none)` for unsigned packages
    pub signature: String,
}

impl PackageDescriptor {
    /// `name-[epoch:]version-release.arch`; a zero epoch is omitted.
    pub fn nevra(&self) -> String {
        let epoch = match self.epoch.as_deref() {
            None | Some("0") => String::new(),
            Some(e) => format!("{e}:"),
        };
        format!("{}-{}{}-{}.{}", self.name, epoch, self.version, self.release, self.arch)
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }
}

/// Looks up installed packages by name.
pub trait PackageSource {
    /// Every installed package called `name`; empty when none is installed.
    fn installed(&self, name: &str) -> Result<Vec<PackageDescriptor>, AdapterError>;
}

const RPM: &str = "rpm";

/// One tab-separated line per installed instance. The signature falls back
/// from the DSA header to the RSA header to `(none)`.
const QUERY_FORMAT: &str = "%{NAME}\\t%{EPOCH}\\t%{VERSION}\\t%{RELEASE}\\t%{ARCH}\\t\
%|DSAHEADER?{%{DSAHEADER:pgpsig}}:{%|RSAHEADER?{%{RSAHEADER:pgpsig}}:{(none)}|}|\\n";

/// Queries the rpm database.
#[derive(Debug, Clone)]
pub struct RpmPackageSource {
    program: PathBuf,
}

impl RpmPackageSource {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl Default for RpmPackageSource {
    fn default() -> Self {
        Self::new(RPM)
    }
}

impl PackageSource for RpmPackageSource {
    fn installed(&self, name: &str) -> Result<Vec<PackageDescriptor>, AdapterError> {
        let output = Command::new(&self.program)
            .args(["-q", "--qf", QUERY_FORMAT, name])
            .output()
            .map_err(|source| AdapterError::Spawn { program: self.program_name(), source })?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            // rpm exits non-zero and says so on stdout when nothing matches
            if stdout.contains("is not installed") {
                tracing::debug!(package = name, "package not installed");
                return Ok(Vec::new());
            }
            return Err(AdapterError::CommandFailed {
                program: self.program_name(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        parse_query_output(&stdout)
    }
}

/// Parse `rpm -q --qf` output produced with the query format above.
pub fn parse_query_output(stdout: &str) -> Result<Vec<PackageDescriptor>, AdapterError> {
    stdout.lines().filter(|line| !line.trim().is_empty()).map(parse_query_line).collect()
}

fn parse_query_line(line: &str) -> Result<PackageDescriptor, AdapterError> {
    let fields: Vec<&str> = line.split('\t').collect();
    let [name, epoch, version, release, arch, signature] = fields.as_slice() else {
        return Err(AdapterError::Parse { program: RPM.to_string(), line: line.to_string() });
    };
    Ok(PackageDescriptor {
        name: name.to_string(),
        epoch: match *epoch {
            "(none)" | "" => None,
            e => Some(e.to_string()),
        },
        version: version.to_string(),
        release: release.to_string(),
        arch: arch.to_string(),
        signature: signature.to_string(),
    })
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{PackageDescriptor, PackageSource};
    use crate::AdapterError;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct FakePackageState {
        packages: Vec<PackageDescriptor>,
        lookups: Vec<String>,
    }

    /// Fake package database for testing
    #[derive(Clone)]
    pub struct FakePackageSource {
        inner: Arc<Mutex<FakePackageState>>,
    }

    impl Default for FakePackageSource {
        fn default() -> Self {
            Self { inner: Arc::new(Mutex::new(FakePackageState { packages: Vec::new(), lookups: Vec::new() })) }
        }
    }

    impl FakePackageSource {
        pub fn new() -> Self {
            Self::default()
        }

        /// A database holding one signed noarch package
        pub fn with_package(name: &str, version: &str, release: &str) -> Self {
            let source = Self::new();
            source.install(PackageDescriptor {
                name: name.to_string(),
                epoch: None,
                version: version.to_string(),
                release: release.to_string(),
                arch: "noarch".to_string(),
                signature: "RSA/SHA256, Key ID 199e2f91fd431d51".to_string(),
            });
            source
        }

        pub fn install(&self, package: PackageDescriptor) {
            self.inner.lock().packages.push(package);
        }

        /// Names looked up so far
        pub fn lookups(&self) -> Vec<String> {
            self.inner.lock().lookups.clone()
        }
    }

    impl PackageSource for FakePackageSource {
        fn installed(&self, name: &str) -> Result<Vec<PackageDescriptor>, AdapterError> {
            let mut inner = self.inner.lock();
            inner.lookups.push(name.to_string());
            Ok(inner.packages.iter().filter(|p| p.name == name).cloned().collect())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakePackageSource;

#[cfg(test)]
#[path = "package_tests.rs"]
mod tests;
