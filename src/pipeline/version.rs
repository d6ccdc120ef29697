//! Kubernetes version identifiers
//!
//! Versions come from release metadata and end up embedded in job
//! identifiers, so they are checked against `[A-Za-z0-9._-]` before any job
//! is built from them.

#![allow(clippy::must_use_candidate)]

use crate::pipeline::errors::VersionError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").unwrap());

/// Pseudo-version used for the smoke-test pair of e2e jobs
pub const DEFAULT_VERSION: &str = "default";

/// A validated version identifier such as `1.21.3`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VersionIdentifier(String);

impl VersionIdentifier {
    /// Validates and wraps a version string
    ///
    /// # Errors
    ///
    /// Returns [`VersionError`] if the version is empty or contains
    /// characters outside `[A-Za-z0-9._-]`.
    pub fn new(version: impl Into<String>) -> Result<Self, VersionError> {
        let version = version.into();
        if version.is_empty() {
            return Err(VersionError::Empty);
        }
        if !VERSION_PATTERN.is_match(&version) {
            return Err(VersionError::InvalidCharacters { version });
        }
        Ok(Self(version))
    }

    /// The `default` pseudo-version
    pub fn default_version() -> Self {
        Self(DEFAULT_VERSION.to_string())
    }

    /// Returns true for the `default` pseudo-version
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_VERSION
    }

    /// Raw version string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Job-id-safe token: every `.` and `-` replaced with `_`
    pub fn token(&self) -> String {
        self.0.replace(['.', '-'], "_")
    }
}

impl FromStr for VersionIdentifier {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for VersionIdentifier {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for VersionIdentifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VersionIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
