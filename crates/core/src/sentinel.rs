// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Serde adapters for fields that are written as the string `"null"` until set.
//!
//! Collection tooling reads the breadcrumbs file with a fixed schema, so an
//! unassigned field is never omitted and never a bare JSON `null` on write.
//! Readers accept both forms.

use crate::record::UNSET;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

pub(crate) mod text {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_deref().unwrap_or(UNSET))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.filter(|v| v != UNSET))
    }
}

pub(crate) mod flag {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Option<bool>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(b) => s.serialize_bool(*b),
            None => s.serialize_str(UNSET),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        match Option::<RawFlag>::deserialize(d)? {
            None => Ok(None),
            Some(RawFlag::Bool(b)) => Ok(Some(b)),
            Some(RawFlag::Text(t)) if t == UNSET => Ok(None),
            Some(RawFlag::Text(t)) => {
                Err(D::Error::custom(format!("expected a boolean or \"{UNSET}\", got {t:?}")))
            }
        }
    }
}

pub(crate) mod timestamp {
    use super::*;
    use crate::time_fmt::{format_timestamp, parse_timestamp};
    use chrono::{DateTime, Utc};

    pub fn serialize<S: Serializer>(value: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => s.serialize_str(&format_timestamp(ts)),
            None => s.serialize_str(UNSET),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(d)? {
            None => Ok(None),
            Some(t) if t == UNSET => Ok(None),
            Some(t) => parse_timestamp(&t)
                .map(Some)
                .map_err(|e| D::Error::custom(format!("invalid timestamp {t:?}: {e}"))),
        }
    }
}
