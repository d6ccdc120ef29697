//! Azure Pipelines backend
//!
//! Renders pipeline documents to Azure Pipelines YAML.
//!
//! Azure expects `job:` and `bash:` to open their list items. The document
//! model serializes those keys as `_job` and `_bash`, and the rendered text is
//! then rewritten by replacing every `- _` with `- `. Free-text values
//! containing `- _` would be corrupted by that rewrite, so they are rejected
//! before serializing.

use crate::pipeline::{PipelineDocument, RenderError, Validate};
use tracing::debug;

/// First line of every generated file
pub const GENERATED_BANNER: &str = "# Code generated by oi-releaser. DO NOT EDIT.";

/// Sequence rewritten by [`normalize_dialect`]
pub const RESERVED_SEQUENCE: &str = "- _";

/// Backend for generating Azure Pipelines YAML
#[derive(Debug, Clone, Copy, Default)]
pub struct AzurePipelinesBackend;

impl AzurePipelinesBackend {
    /// Creates a new Azure Pipelines backend
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Renders a document: banner line followed by dialect YAML.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Validation`] if the document breaks a structural
    /// invariant, [`RenderError::ReservedSequence`] if a value contains `- _`,
    /// and [`RenderError::Serialization`] if serde_yaml fails.
    pub fn render(&self, document: &PipelineDocument) -> Result<String, RenderError> {
        document.validate()?;
        check_reserved_sequence(document)?;

        let generic = serde_yaml::to_string(document)?;
        let normalized = normalize_dialect(&generic);

        debug!(
            jobs = document.jobs.len(),
            bytes = normalized.len(),
            "rendered azure pipeline"
        );
        Ok(format!("{GENERATED_BANNER}\n{normalized}"))
    }
}

/// Rewrites placeholder list-item keys into Azure's form (`- _job` to `- job`)
#[must_use]
pub fn normalize_dialect(yaml: &str) -> String {
    yaml.replace(RESERVED_SEQUENCE, "- ")
}

fn check_reserved_sequence(document: &PipelineDocument) -> Result<(), RenderError> {
    let reject = |field: String, value: &str| {
        if value.contains(RESERVED_SEQUENCE) {
            Err(RenderError::ReservedSequence {
                field,
                value: value.to_string(),
            })
        } else {
            Ok(())
        }
    };

    for (key, value) in &document.variables {
        reject(format!("variables.{key}"), key)?;
        reject(format!("variables.{key}"), value)?;
    }

    for (i, job) in document.jobs.iter().enumerate() {
        reject(format!("jobs[{i}].displayName"), &job.display_name)?;
        reject(format!("jobs[{i}].pool.vmImage"), &job.pool.vm_image)?;
        for (j, step) in job.steps.iter().enumerate() {
            reject(format!("jobs[{i}].steps[{j}].bash"), &step.command)?;
            reject(format!("jobs[{i}].steps[{j}].displayName"), &step.display_name)?;
            for (key, value) in &step.env {
                reject(format!("jobs[{i}].steps[{j}].env.{key}"), key)?;
                reject(format!("jobs[{i}].steps[{j}].env.{key}"), value)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{Job, Step, ValidationError, VersionIdentifier, assemble};
    use proptest::prelude::*;

    fn render(document: &PipelineDocument) -> Result<String, RenderError> {
        AzurePipelinesBackend::new().render(document)
    }

    #[test]
    fn test_output_starts_with_banner() {
        let yaml = render(&assemble(&[])).unwrap();
        assert!(yaml.starts_with("# Code generated by oi-releaser. DO NOT EDIT.\n"));
        assert_eq!(yaml.lines().filter(|l| l.starts_with('#')).count(), 1);
    }

    #[test]
    fn test_placeholder_keys_are_rewritten() {
        let yaml = render(&assemble(&[])).unwrap();

        assert!(!yaml.contains("_job"));
        assert!(!yaml.contains("_bash"));
        assert!(yaml.contains("jobs:\n- job: build\n  displayName: Build\n"));
        assert!(
            yaml.contains("  - bash: make pull-builder\n    displayName: Pull builder image\n")
        );
        assert!(yaml.contains("- job: unit_and_integration_tests\n"));
        assert!(yaml.contains("- job: e2e_default_with_local_cri_endpoints\n"));
        assert!(yaml.contains("    vmImage: ubuntu-18.04\n"));
    }

    #[test]
    fn test_variables_and_env_rendered() {
        let versions = vec![VersionIdentifier::new("1.21.0").unwrap()];
        let yaml = render(&assemble(&versions)).unwrap();

        assert!(yaml.contains("variables:\n  CI: "));
        assert!(yaml.contains("- job: e2e_1_21_0_with_remote_cri_endpoints\n"));
        assert!(yaml.contains("  - bash: make e2e-remote\n"));
        assert!(yaml.contains("    env:\n      KUBERNETES_VERSION: "));
    }

    #[test]
    fn test_generated_yaml_is_valid() {
        let versions = vec![
            VersionIdentifier::new("1.20.0").unwrap(),
            VersionIdentifier::new("1.21.0").unwrap(),
        ];
        let yaml = render(&assemble(&versions)).unwrap();

        let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        let jobs = parsed["jobs"].as_sequence().unwrap();
        assert_eq!(jobs.len(), 8);
        assert_eq!(jobs[0]["job"].as_str(), Some("build"));
        assert_eq!(
            jobs[7]["job"].as_str(),
            Some("e2e_1_21_0_with_remote_cri_endpoints")
        );
        assert_eq!(jobs[7]["steps"][1]["bash"].as_str(), Some("make e2e-remote"));
        assert_eq!(
            jobs[7]["steps"][1]["env"]["KUBERNETES_VERSION"].as_str(),
            Some("1.21.0")
        );
        assert_eq!(parsed["variables"]["CI"].as_str(), Some("1"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let versions = vec![VersionIdentifier::new("1.19.7").unwrap()];
        assert_eq!(
            render(&assemble(&versions)).unwrap(),
            render(&assemble(&versions)).unwrap()
        );
    }

    #[test]
    fn test_reserved_sequence_rejected() {
        let mut document = PipelineDocument::new();
        document.extend_jobs(vec![Job::new(
            "build",
            "Build",
            vec![Step::bash("make", "list - _private targets")],
        )]);

        match render(&document) {
            Err(RenderError::ReservedSequence { field, value }) => {
                assert_eq!(field, "jobs[0].steps[0].displayName");
                assert_eq!(value, "list - _private targets");
            }
            other => panic!("expected reserved sequence error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_document_rejected() {
        let mut document = PipelineDocument::new();
        document.extend_jobs(vec![Job::new("build", "Build", vec![])]);

        assert_eq!(
            render(&document),
            Err(RenderError::Validation(ValidationError::EmptySteps {
                job: "build".to_string()
            }))
        );
    }

    #[test]
    fn test_normalize_dialect() {
        assert_eq!(
            normalize_dialect("jobs:\n- _job: a\n  steps:\n  - _bash: b\n"),
            "jobs:\n- job: a\n  steps:\n  - bash: b\n"
        );
        assert_eq!(normalize_dialect("no placeholders"), "no placeholders");
    }

    fn list_items(yaml: &str) -> usize {
        yaml.matches("- ").count() - yaml.matches(RESERVED_SEQUENCE).count()
    }

    fn serializer_line() -> impl Strategy<Value = String> {
        prop_oneof![
            " {0,4}- _[a-z]{1,8}: [a-z ]{0,12}",
            " {0,4}- [a-z]{1,8}: [a-z ]{0,12}",
            " {0,4}[a-zA-Z]{1,8}:( [a-z0-9.]{1,12})?",
        ]
    }

    proptest! {
        #[test]
        fn prop_normalize_rewrites_every_placeholder(
            lines in proptest::collection::vec(serializer_line(), 0..16)
        ) {
            let input = lines.join("\n");
            let placeholders = input.matches(RESERVED_SEQUENCE).count();
            let output = normalize_dialect(&input);

            prop_assert_eq!(output.matches(RESERVED_SEQUENCE).count(), 0);
            prop_assert_eq!(list_items(&output), list_items(&input) + placeholders);
            prop_assert_eq!(output.len(), input.len() - placeholders);
        }
    }
}
