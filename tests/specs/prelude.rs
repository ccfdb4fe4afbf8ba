// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builders and assertions shared by the specs.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

pub use serde_json::Value;

pub const NEVRA: &str = "convert2rhel-2.1.0-1.el8.noarch";
pub const SOURCE_OS: &str = "CentOS Linux release 8.5.2111";

/// Path to the `crumbs` binary: `CRUMBS_BIN`, else the target directory that
/// holds this test executable (`target/<profile>/deps/..`).
pub fn crumbs_bin() -> PathBuf {
    if let Some(path) = std::env::var_os("CRUMBS_BIN") {
        return PathBuf::from(path);
    }
    let exe = std::env::current_exe().unwrap();
    let profile_dir = exe.parent().and_then(Path::parent).unwrap();
    let bin = profile_dir.join(format!("crumbs{}", std::env::consts::EXE_SUFFIX));
    assert!(bin.exists(), "{} not built; run `cargo build -p crumbs` first", bin.display());
    bin
}

/// `crumbs` with a clean environment
pub fn cli() -> CliBuilder {
    let mut cmd = assert_cmd::Command::new(crumbs_bin());
    cmd.env_remove("CRUMBS_CONFIG").env_remove("CRUMBS_RESULTS_PATH").env_remove("CRUMBS_LOG");
    CliBuilder { cmd }
}

pub struct CliBuilder {
    cmd: assert_cmd::Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(self) -> RunAssert {
        self.exits(0)
    }

    /// Expect a non-zero exit
    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        assert!(!output.status.success(), "expected failure\n{}", describe(&output));
        RunAssert { output }
    }

    pub fn exits(mut self, code: i32) -> RunAssert {
        let output = self.cmd.output().unwrap();
        assert_eq!(output.status.code(), Some(code), "unexpected exit\n{}", describe(&output));
        RunAssert { output }
    }
}

fn describe(output: &Output) -> String {
    format!(
        "stdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(needle), "stdout lacks {needle:?}\n{}", describe(&self.output));
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(!stdout.contains(needle), "stdout has {needle:?}\n{}", describe(&self.output));
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(needle), "stderr lacks {needle:?}\n{}", describe(&self.output));
        self
    }
}

/// A fake host: release file, rpm stand-in, and a config pointing at them.
pub struct Host {
    dir: tempfile::TempDir,
}

impl Host {
    /// convert2rhel installed once
    pub fn installed() -> Self {
        let host = Self::bare();
        host.rpm(r"printf 'convert2rhel\t(none)\t2.1.0\t1.el8\tnoarch\t(none)\n'");
        host
    }

    /// convert2rhel not installed
    pub fn without_package() -> Self {
        let host = Self::bare();
        host.rpm(r#"echo "package $4 is not installed"; exit 1"#);
        host
    }

    fn bare() -> Self {
        let host = Self { dir: tempfile::tempdir().unwrap() };
        host.file("system-release", &format!("{SOURCE_OS}\n"));
        let config = format!(
            "results_path = \"{}\"\nrelease_file = \"{}\"\nrpm_program = \"{}\"\n",
            host.results_path().display(),
            host.path("system-release").display(),
            host.path("rpm").display(),
        );
        host.file("crumbs.toml", &config);
        host
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn file(&self, name: &str, content: &str) {
        std::fs::write(self.path(name), content).unwrap();
    }

    /// Replace the rpm stand-in with a shell script body
    pub fn rpm(&self, body: &str) {
        write_script(&self.path("rpm"), body);
    }

    pub fn results_path(&self) -> PathBuf {
        self.path("migration-results")
    }

    pub fn results(&self) -> Value {
        let text = std::fs::read_to_string(self.results_path()).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    pub fn activities(&self) -> Vec<Value> {
        self.results()["activities"].as_array().cloned().unwrap_or_default()
    }

    /// `crumbs --config <host config>`
    pub fn crumbs(&self) -> CliBuilder {
        let config = self.path("crumbs.toml");
        cli().args(&["--config", config.to_str().unwrap()])
    }
}

fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}
