//! Location identity: sanitized keys and generated ids

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Prefix used for generated location ids
pub const LOCATION_ID_PREFIX: &str = "loc_";

/// Reduce an arbitrary key to lowercase ASCII alphanumerics, `_` and `-`
///
/// Uppercase letters are lowered first; every other character is dropped.
pub fn sanitize_key(raw: &str) -> String {
    raw.chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

/// Opaque, stable key of a location within the collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(String);

impl LocationId {
    /// Generate a fresh id (`loc_` followed by a lowercase ULID)
    pub fn generate() -> Self {
        Self(format!(
            "{}{}",
            LOCATION_ID_PREFIX,
            Ulid::new().to_string().to_lowercase()
        ))
    }

    /// Parse an id, sanitizing it the same way submitted form keys are
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LocationId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = sanitize_key(s);
        if key.is_empty() {
            return Err(IdParseError::Empty(s.to_string()));
        }
        Ok(Self(key))
    }
}

impl Serialize for LocationId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for LocationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing location ids
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid location id '{0}': nothing left after sanitizing (allowed: a-z, 0-9, '_', '-')")]
    Empty(String),
}
