//! Test pipeline assembly
//!
//! Builds the full test pipeline: a static prologue (build, unit and
//! integration tests), the `default` e2e pair, then one e2e pair per
//! supported Kubernetes version in release order.

use crate::pipeline::document::{Job, PipelineDocument, Step};
use crate::pipeline::matrix::expand_version;
use crate::pipeline::version::VersionIdentifier;
use tracing::debug;

/// Assembles the test pipeline for the given Kubernetes versions.
///
/// Job identifiers are unique as long as the version tokens are pairwise
/// distinct and none of them is `default`; no deduplication happens here.
#[must_use]
pub fn assemble(versions: &[VersionIdentifier]) -> PipelineDocument {
    let mut document = PipelineDocument::new().variable("CI", "1");
    document.extend_jobs(prologue());
    document.extend_jobs(expand_version(&VersionIdentifier::default_version()));
    for version in versions {
        document.extend_jobs(expand_version(version));
    }

    debug!(
        versions = versions.len(),
        jobs = document.jobs.len(),
        "assembled test pipeline"
    );
    document
}

fn prologue() -> [Job; 2] {
    [
        Job::new(
            "build",
            "Build",
            vec![
                Step::bash("make pull-builder", "Pull builder image"),
                Step::bash("make", "Build"),
            ],
        ),
        Job::new(
            "unit_and_integration_tests",
            "Unit and Integration tests",
            vec![
                Step::bash("make pull-builder", "Pull builder image"),
                Step::bash("make test", "Test"),
            ],
        ),
    ]
}
