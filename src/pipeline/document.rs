//! Pipeline document model
//!
//! Typed representation of an Azure Pipelines document: top-level variables
//! and an ordered list of jobs, each made of bash steps. The model is a plain
//! data container; invariants are checked through [`Validate`].
//!
//! The identifying key of a job (`job`) and of a step (`bash`) must be the
//! first key of its list item. They serialize under the placeholder names
//! `_job` and `_bash`, which the dialect normalizer rewrites.

#![allow(clippy::must_use_candidate, clippy::return_self_not_must_use)]

use crate::pipeline::errors::ValidationError;
use crate::pipeline::types::Validate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// VM image used by every generated job
pub const DEFAULT_VM_IMAGE: &str = "ubuntu-18.04";

static JOB_ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

/// A complete pipeline document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PipelineDocument {
    /// Pipeline-level variables
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,

    /// Jobs in declaration order
    pub jobs: Vec<Job>,
}

impl PipelineDocument {
    /// Creates an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a pipeline variable
    pub fn variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Appends jobs preserving their order
    pub fn extend_jobs(&mut self, jobs: impl IntoIterator<Item = Job>) {
        self.jobs.extend(jobs);
    }

    /// Returns job identifiers in order
    pub fn job_ids(&self) -> Vec<&str> {
        self.jobs.iter().map(|job| job.id.as_str()).collect()
    }

    /// Looks a job up by identifier
    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }
}

impl Validate for PipelineDocument {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        let mut seen = HashSet::new();
        for job in &self.jobs {
            job.validate()?;
            if !seen.insert(job.id.as_str()) {
                return Err(ValidationError::DuplicateJobId { id: job.id.clone() });
            }
        }
        Ok(())
    }
}

impl fmt::Display for PipelineDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PipelineDocument: {} jobs, {} variables",
            self.jobs.len(),
            self.variables.len()
        )
    }
}

/// A named unit of pipeline work
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Job identifier
    #[serde(rename = "_job")]
    pub id: String,

    /// Human readable name
    pub display_name: String,

    /// Execution pool
    pub pool: PoolReference,

    /// Steps in execution order
    pub steps: Vec<Step>,
}

impl Job {
    /// Creates a job on the default pool
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            pool: PoolReference::default(),
            steps,
        }
    }
}

impl Validate for Job {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyJobId);
        }

        if !JOB_ID_PATTERN.is_match(&self.id) {
            return Err(ValidationError::InvalidJobId {
                id: self.id.clone(),
            });
        }

        if self.steps.is_empty() {
            return Err(ValidationError::EmptySteps {
                job: self.id.clone(),
            });
        }

        Ok(())
    }
}

/// A single bash invocation within a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Command passed to bash
    #[serde(rename = "_bash")]
    pub command: String,

    /// Human readable name
    pub display_name: String,

    /// Environment variables for this step
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl Step {
    /// Creates a bash step without environment
    pub fn bash(command: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            display_name: display_name.into(),
            env: BTreeMap::new(),
        }
    }

    /// Adds an environment variable
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

/// Reference to an externally defined execution pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolReference {
    /// Hosted VM image name
    pub vm_image: String,
}

impl Default for PoolReference {
    fn default() -> Self {
        Self {
            vm_image: DEFAULT_VM_IMAGE.to_string(),
        }
    }
}
