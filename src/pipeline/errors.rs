//! Error types for pipeline domain

use thiserror::Error;

/// Errors raised while turning a pipeline document into dialect YAML
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The document violates a structural invariant
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A free-text value contains the sequence the dialect normalizer rewrites
    #[error("{field} contains the reserved sequence '- _': {value:?}")]
    ReservedSequence {
        /// Location of the offending value.
        field: String,
        /// The offending value.
        value: String,
    },

    /// The generic YAML serializer rejected the document
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_yaml::Error> for RenderError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Validation errors for pipeline documents
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Job identifier cannot be empty
    #[error("Job identifier cannot be empty")]
    EmptyJobId,

    /// Job identifier contains characters the dialect does not accept
    #[error("Invalid characters in job identifier: '{id}'")]
    InvalidJobId {
        /// The invalid identifier.
        id: String,
    },

    /// Job must have at least one step
    #[error("Job '{job}' must have at least one step")]
    EmptySteps {
        /// Identifier of the empty job.
        job: String,
    },

    /// Two jobs share an identifier
    #[error("Duplicate job identifier: '{id}'")]
    DuplicateJobId {
        /// The repeated identifier.
        id: String,
    },
}

/// Errors for version identifiers supplied by release metadata
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Version cannot be empty
    #[error("Version identifier cannot be empty")]
    Empty,

    /// Version contains characters outside `[A-Za-z0-9._-]`
    #[error("Invalid characters in version identifier: '{version}'")]
    InvalidCharacters {
        /// The rejected version.
        version: String,
    },
}
