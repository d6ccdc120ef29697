//! Release metadata
//!
//! Reads the release file listing the Kubernetes versions a release
//! supports. Only the version list matters here; per-version component
//! versions are ignored.

use crate::pipeline::VersionIdentifier;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors loading release metadata
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReleaseError {
    /// The release file could not be read
    #[error("Failed to read release file {path}: {message}")]
    Io {
        /// Path of the release file.
        path: String,
        /// Underlying IO error.
        message: String,
    },

    /// The release file is not valid release metadata
    #[error("Invalid release metadata: {0}")]
    Parse(String),
}

impl From<serde_yaml::Error> for ReleaseError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Release metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseData {
    /// Release version
    #[serde(default)]
    pub version: Option<String>,

    /// Supported Kubernetes versions, in release order
    #[serde(default)]
    pub kubernetes_versions: Vec<KubernetesVersion>,
}

/// A supported Kubernetes version entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KubernetesVersion {
    /// Kubernetes version
    pub version: VersionIdentifier,
}

impl ReleaseData {
    /// Parses release metadata from YAML
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::Parse`] for malformed YAML or invalid versions.
    pub fn from_yaml(content: &str) -> Result<Self, ReleaseError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Loads release metadata from a file
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::Io`] if the file cannot be read, or
    /// [`ReleaseError::Parse`] if its content is invalid.
    pub fn load(path: &Path) -> Result<Self, ReleaseError> {
        let content = fs::read_to_string(path).map_err(|e| ReleaseError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&content)
    }

    /// Kubernetes versions in release order
    #[must_use]
    pub fn versions(&self) -> Vec<VersionIdentifier> {
        self.kubernetes_versions
            .iter()
            .map(|entry| entry.version.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const RELEASE: &str = r"
version: 21.05.0-alpha1
kubernetesVersions:
  - version: 1.19.10
    etcdVersion: 3.4.13
    pauseVersion: '3.2'
  - version: 1.20.6
  - version: 1.21.0
containerdVersions:
  - version: 1.4.4
";

    #[test]
    fn test_versions_keep_file_order() {
        let release = ReleaseData::from_yaml(RELEASE).unwrap();
        assert_eq!(release.version.as_deref(), Some("21.05.0-alpha1"));
        let versions: Vec<String> = release.versions().iter().map(ToString::to_string).collect();
        assert_eq!(versions, vec!["1.19.10", "1.20.6", "1.21.0"]);
    }

    #[test]
    fn test_empty_release_has_no_versions() {
        assert!(ReleaseData::from_yaml("").unwrap().versions().is_empty());
        assert!(
            ReleaseData::from_yaml("version: 1.0.0\n")
                .unwrap()
                .versions()
                .is_empty()
        );
    }

    #[test]
    fn test_invalid_version_rejected() {
        let err = ReleaseData::from_yaml("kubernetesVersions:\n  - version: '1.21 beta'\n")
            .unwrap_err();
        assert!(matches!(err, ReleaseError::Parse(_)));
        assert!(err.to_string().contains("1.21 beta"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(RELEASE.as_bytes()).unwrap();

        let release = ReleaseData::load(file.path()).unwrap();
        assert_eq!(release.kubernetes_versions.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReleaseData::load(&dir.path().join("RELEASE")).unwrap_err();
        assert!(matches!(err, ReleaseError::Io { .. }));
    }
}
