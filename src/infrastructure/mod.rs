//! Infrastructure layer
//!
//! This module contains external integrations and adapters.

pub mod azure;
mod config;
mod logging;
pub mod manifests;
pub mod release;

pub use azure::{AzurePipelinesBackend, GENERATED_BANNER, normalize_dialect};
pub use config::{Config, ConfigError};
pub use logging::init_logging;
pub use manifests::{ClusterRecord, ManifestError, api_server_ca, lookup_cluster, retrieve_clusters};
pub use release::{ReleaseData, ReleaseError};
