// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append entries to a JSON array stored under one top-level key.
//!
//! The file is shared by every run of the tool and read by external
//! collection tooling. Existing content is never discarded when it cannot be
//! understood: a new self-contained `{key: [entry]}` block is written after it
//! instead. Every completed append leaves the file owner read-write only.
//!
//! An exclusive advisory lock is held from open until the file is closed, so
//! cooperating writers do not lose each other's updates. Rewrites happen in
//! place (the lock lives on the inode) and are truncated to the new length.

use crumbs_core::ForeignKeys;
use fs2::FileExt;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Mode of the results file after every completed append.
#[cfg_attr(not(unix), allow(dead_code))]
const FILE_MODE: u32 = 0o600;

/// Errors that can occur while appending to or reading a results file
#[derive(Debug, Error)]
pub enum LogError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize entry: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which branch an append took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The file was missing or empty and now holds a single entry.
    Created,
    /// The entry was added to an existing array, which now holds `entries`.
    Appended { entries: usize },
    /// The file was a valid object without the array; the array was added.
    KeyAdded,
    /// The content could not be understood and was left in place; a new
    /// block holding the entry was written after it.
    Recovered,
}

/// What a reader found in the results file.
#[derive(Debug, Clone, PartialEq)]
pub enum LogContents {
    Missing,
    Entries(Vec<Value>),
    /// A valid object without the array key.
    NoKey,
    /// Content that does not parse as a single object holding the array,
    /// typically after a forensic append.
    Malformed { reason: String, len: usize },
}

enum ParsedLog {
    Empty,
    WithArray(Map<String, Value>),
    MissingKey(Map<String, Value>),
    Malformed(String),
}

fn parse_log(bytes: &[u8], key: &str) -> ParsedLog {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return ParsedLog::Empty;
    }
    match serde_json::from_slice::<Value>(bytes) {
        Err(e) => ParsedLog::Malformed(e.to_string()),
        Ok(Value::Object(doc)) => match doc.get(key) {
            None => ParsedLog::MissingKey(doc),
            Some(Value::Array(_)) => ParsedLog::WithArray(doc),
            Some(_) => ParsedLog::Malformed(format!("\"{key}\" is not an array")),
        },
        Ok(_) => ParsedLog::Malformed("top level is not an object".to_string()),
    }
}

/// A JSON results file holding an array of entries under `key`.
#[derive(Debug, Clone)]
pub struct ArrayLog {
    path: PathBuf,
    key: String,
    foreign_keys: ForeignKeys,
}

impl ArrayLog {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self { path: path.into(), key: key.into(), foreign_keys: ForeignKeys::default() }
    }

    /// Set what happens to other top-level keys when the array is missing.
    pub fn with_foreign_keys(mut self, policy: ForeignKeys) -> Self {
        self.foreign_keys = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Durably add `entry` to the array.
    ///
    /// Unparseable content is recovered by appending after it; every other
    /// failure (open, lock, read, write, sync, chmod) is returned.
    pub fn append<T: Serialize>(&self, entry: &T) -> Result<AppendOutcome, LogError> {
        let entry = serde_json::to_value(entry)?;
        let io = |source| LogError::Io { path: self.path.clone(), source };

        let mut file = open_or_create(&self.path).map_err(io)?;
        FileExt::lock_exclusive(&file).map_err(io)?;

        let mut existing = Vec::new();
        file.read_to_end(&mut existing).map_err(io)?;

        let outcome = match parse_log(&existing, &self.key) {
            ParsedLog::Empty => {
                let doc = self.document(Map::new(), entry);
                rewrite(&mut file, &doc).map_err(io)?;
                tracing::info!(path = %self.path.display(), "created results file");
                AppendOutcome::Created
            }
            ParsedLog::WithArray(mut doc) => {
                let mut entries = 0;
                if let Some(Value::Array(items)) = doc.get_mut(&self.key) {
                    items.push(entry);
                    entries = items.len();
                }
                rewrite(&mut file, &Value::Object(doc)).map_err(io)?;
                tracing::debug!(path = %self.path.display(), entries, "appended entry");
                AppendOutcome::Appended { entries }
            }
            ParsedLog::MissingKey(doc) => {
                let kept = match self.foreign_keys {
                    ForeignKeys::Discard => Map::new(),
                    ForeignKeys::Preserve => doc,
                };
                tracing::warn!(
                    path = %self.path.display(),
                    key = %self.key,
                    policy = ?self.foreign_keys,
                    "results file has no entry array, adding it"
                );
                rewrite(&mut file, &self.document(kept, entry)).map_err(io)?;
                AppendOutcome::KeyAdded
            }
            ParsedLog::Malformed(reason) => {
                tracing::warn!(
                    path = %self.path.display(),
                    reason = %reason,
                    "results file is malformed, appending after existing content"
                );
                let block = self.document(Map::new(), entry);
                append_block(&mut file, &existing, &block).map_err(io)?;
                AppendOutcome::Recovered
            }
        };

        file.sync_all().map_err(io)?;
        restrict_permissions(&file).map_err(io)?;
        Ok(outcome)
    }

    /// Read the array back without modifying the file.
    pub fn read_entries(&self) -> Result<LogContents, LogError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(LogContents::Missing),
            Err(source) => return Err(LogError::Io { path: self.path.clone(), source }),
        };
        Ok(match parse_log(&bytes, &self.key) {
            ParsedLog::Empty => LogContents::Entries(Vec::new()),
            ParsedLog::WithArray(mut doc) => match doc.remove(&self.key) {
                Some(Value::Array(items)) => LogContents::Entries(items),
                _ => LogContents::Entries(Vec::new()),
            },
            ParsedLog::MissingKey(_) => LogContents::NoKey,
            ParsedLog::Malformed(reason) => LogContents::Malformed { reason, len: bytes.len() },
        })
    }

    fn document(&self, mut base: Map<String, Value>, entry: Value) -> Value {
        base.insert(self.key.clone(), Value::Array(vec![entry]));
        Value::Object(base)
    }
}

/// Append `entry` to the array under `key` in the file at `path`, with the
/// default handling of foreign top-level keys.
pub fn append_to_array<T: Serialize>(
    path: &Path,
    entry: &T,
    key: &str,
) -> Result<AppendOutcome, LogError> {
    ArrayLog::new(path, key).append(entry)
}

fn open_or_create(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true).truncate(false);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options.open(path)
}

/// Four-space indented JSON followed by a newline.
fn to_pretty(doc: &Value) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    doc.serialize(&mut ser).map_err(std::io::Error::other)?;
    buf.push(b'\n');
    Ok(buf)
}

fn rewrite(file: &mut File, doc: &Value) -> std::io::Result<()> {
    let bytes = to_pretty(doc)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(&bytes)?;
    file.set_len(bytes.len() as u64)
}

fn append_block(file: &mut File, existing: &[u8], doc: &Value) -> std::io::Result<()> {
    let bytes = to_pretty(doc)?;
    file.seek(SeekFrom::End(0))?;
    if existing.last().is_some_and(|b| *b != b'\n') {
        file.write_all(b"\n")?;
    }
    file.write_all(&bytes)
}

#[cfg(unix)]
fn restrict_permissions(file: &File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(FILE_MODE))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
#[path = "array_log_tests.rs"]
mod tests;
