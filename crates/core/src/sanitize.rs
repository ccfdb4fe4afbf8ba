// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Redact secret option values from a command line.
//!
//! Handles both `--option=value` and `--option value` spellings. Redacted
//! values are replaced by one `*` per character, so their length stays
//! visible but their content does not.

use std::collections::BTreeSet;

/// Options whose values are always redacted from a recorded command line.
pub const DEFAULT_SENSITIVE_OPTIONS: &[&str] = &["--password", "-p", "--activationkey", "-k"];

/// Build an option set from string literals.
pub fn sensitive_set<I, S>(names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Into::into).collect()
}

/// Join `args` into a single line with the values of `sensitive` options masked.
///
/// A sensitive option given as a separate token consumes the token after it,
/// which is masked and never inspected as an argument of its own. A trailing
/// sensitive option with nothing after it is emitted as-is. Any argument (or
/// `name=value` value) containing whitespace is wrapped in double quotes.
pub fn sanitize<A: AsRef<str>>(args: &[A], sensitive: &BTreeSet<String>) -> String {
    let mut out: Vec<String> = Vec::with_capacity(args.len());
    let mut tokens = args.iter().map(AsRef::as_ref);

    while let Some(token) = tokens.next() {
        if let Some((name, value)) = token.split_once('=') {
            if sensitive.contains(name) {
                out.push(format!("{name}={}", mask(value)));
            } else if has_whitespace(value) {
                out.push(format!("{name}=\"{value}\""));
            } else {
                out.push(token.to_string());
            }
        } else if sensitive.contains(token) {
            out.push(token.to_string());
            if let Some(value) = tokens.next() {
                out.push(mask(value));
            }
        } else if has_whitespace(token) {
            out.push(format!("\"{token}\""));
        } else {
            out.push(token.to_string());
        }
    }

    out.join(" ")
}

fn mask(value: &str) -> String {
    "*".repeat(value.chars().count())
}

fn has_whitespace(s: &str) -> bool {
    s.chars().any(char::is_whitespace)
}

#[cfg(test)]
#[path = "sanitize_tests.rs"]
mod tests;
