//! Cluster manifests
//!
//! Reads multi-document YAML manifest streams and indexes the `Cluster`
//! documents by name. Other kinds are skipped.

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors reading manifests
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    /// A document in the stream is not valid YAML or not a valid cluster
    #[error("Invalid manifest: {0}")]
    Parse(String),

    /// No cluster with the requested name
    #[error("cluster {0:?} not found")]
    ClusterNotFound(String),
}

impl From<serde_yaml::Error> for ManifestError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// A `Cluster` manifest
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRecord {
    /// Object metadata
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,

    /// Cluster specification
    #[serde(default, deserialize_with = "null_as_default")]
    pub spec: ClusterSpec,
}

/// Object metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ObjectMeta {
    /// Object name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Cluster specification
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    /// Kubernetes API server settings
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_server: ApiServer,
}

/// Kubernetes API server settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ApiServer {
    /// Certificate authority the API server certificates are signed by
    #[serde(default, deserialize_with = "null_as_default")]
    pub ca: CertificateAuthority,
}

/// A certificate authority
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateAuthority {
    /// PEM encoded certificate
    #[serde(default, deserialize_with = "null_as_default")]
    pub certificate: String,
}

/// Reads an empty (`null`) field as its default value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Clusters found in a manifest stream, by name
pub type ClusterMap = BTreeMap<String, ClusterRecord>;

/// Collects every `Cluster` document of a manifest stream.
///
/// # Errors
///
/// Returns [`ManifestError::Parse`] if a document is not valid YAML or a
/// `Cluster` document does not match the expected shape.
pub fn retrieve_clusters(manifests: &str) -> Result<ClusterMap, ManifestError> {
    let mut clusters = ClusterMap::new();
    for document in serde_yaml::Deserializer::from_str(manifests) {
        let value = Value::deserialize(document)?;
        if value.get("kind").and_then(Value::as_str) != Some("Cluster") {
            continue;
        }
        let cluster: ClusterRecord = serde_yaml::from_value(value)?;
        clusters.insert(cluster.metadata.name.clone(), cluster);
    }
    Ok(clusters)
}

/// Looks a cluster up by name
#[must_use]
pub fn lookup_cluster<'a>(clusters: &'a ClusterMap, name: &str) -> Option<&'a ClusterRecord> {
    clusters.get(name)
}

/// Returns the API server CA certificate of the named cluster, verbatim.
///
/// # Errors
///
/// Returns [`ManifestError::ClusterNotFound`] if no cluster has that name,
/// or [`ManifestError::Parse`] if the stream cannot be read.
pub fn api_server_ca(manifests: &str, name: &str) -> Result<String, ManifestError> {
    let clusters = retrieve_clusters(manifests)?;
    lookup_cluster(&clusters, name)
        .map(|cluster| cluster.spec.api_server.ca.certificate.clone())
        .ok_or_else(|| ManifestError::ClusterNotFound(name.to_string()))
}
