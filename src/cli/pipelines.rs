//! `oi-releaser pipelines` - Generate CI pipelines

use anyhow::{Context, Result};
use oi_releaser::{AzurePipelinesBackend, Config, ReleaseData, VersionIdentifier, assemble};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Picks the Kubernetes versions to test.
///
/// Versions given on the command line win. Otherwise they come from the
/// release file: an explicitly requested file must exist, the configured
/// default may be absent, in which case only the `default` jobs are generated.
pub fn resolve_versions(
    flags: Vec<VersionIdentifier>,
    release_file: Option<&Path>,
    config: &Config,
) -> Result<Vec<VersionIdentifier>> {
    if !flags.is_empty() {
        debug!(count = flags.len(), "using versions from command line");
        return Ok(flags);
    }

    let (path, explicit) = match release_file {
        Some(path) => (path, true),
        None => (config.release_file.as_path(), false),
    };

    if !explicit && !path.exists() {
        info!(path = %path.display(), "no release file, generating default jobs only");
        return Ok(Vec::new());
    }

    let release = ReleaseData::load(path)
        .with_context(|| format!("Failed to load release metadata: {}", path.display()))?;
    let versions = release.versions();
    debug!(path = %path.display(), count = versions.len(), "loaded release metadata");
    Ok(versions)
}

/// Renders the Azure Pipelines test pipeline for the given versions
pub fn azure_test(versions: &[VersionIdentifier]) -> Result<String> {
    let document = assemble(versions);
    let rendered = AzurePipelinesBackend::new()
        .render(&document)
        .context("Failed to render azure test pipeline")?;
    info!(jobs = document.jobs.len(), "generated azure test pipeline");
    Ok(rendered)
}

/// Writes rendered output to a file, or verbatim to stdout
pub fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("Failed to write output to: {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")
        }
    }
}
