//! `oi-releaser cluster` - Inspect cluster manifests

use anyhow::{Context, Result};
use oi_releaser::api_server_ca;
use std::io::{Read, Write};
use tracing::debug;

/// Reads manifests from stdin and prints the API server CA of `cluster_name`
pub fn apiserver_ca(cluster_name: &str) -> Result<()> {
    let mut manifests = String::new();
    std::io::stdin()
        .read_to_string(&mut manifests)
        .context("Failed to read manifests from stdin")?;
    debug!(bytes = manifests.len(), cluster = cluster_name, "read manifests");

    let certificate = api_server_ca(&manifests, cluster_name)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(certificate.as_bytes())
        .and_then(|()| stdout.flush())
        .context("Failed to write to stdout")
}
