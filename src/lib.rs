//! # oi-releaser - release tooling for oneinfra
//!
//! Generates the Azure Pipelines test pipeline from the list of Kubernetes
//! versions a release supports, and extracts data from cluster manifests.
//!
//! ## Pipeline generation
//!
//! The test pipeline is a static prologue (build, unit and integration
//! tests) followed by a pair of end-to-end jobs per Kubernetes version, one
//! against local CRI endpoints and one against remote CRI endpoints:
//!
//! ```rust
//! use oi_releaser::{AzurePipelinesBackend, VersionIdentifier, assemble};
//!
//! let versions = vec![VersionIdentifier::new("1.21.0").unwrap()];
//! let document = assemble(&versions);
//! assert_eq!(document.jobs.len(), 6);
//!
//! let yaml = AzurePipelinesBackend::new().render(&document).unwrap();
//! assert!(yaml.starts_with("# Code generated by oi-releaser. DO NOT EDIT."));
//! assert!(yaml.contains("- job: e2e_1_21_0_with_local_cri_endpoints"));
//! ```
//!
//! ## License
//!
//! Licensed under the Apache License, Version 2.0
//! (<https://www.apache.org/licenses/LICENSE-2.0>).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod infrastructure;
pub mod pipeline;

// Prelude module for common imports
pub mod prelude;

// Re-export commonly used types
pub use infrastructure::{
    AzurePipelinesBackend, ClusterRecord, Config, ConfigError, GENERATED_BANNER, ManifestError,
    ReleaseData, ReleaseError, api_server_ca, init_logging, normalize_dialect, retrieve_clusters,
};
pub use pipeline::{
    Job, PipelineDocument, PoolReference, RenderError, Step, Validate, ValidationError,
    VersionError, VersionIdentifier, assemble, expand_version,
};

/// Version of the oi-releaser crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
