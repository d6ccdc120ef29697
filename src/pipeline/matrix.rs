//! Kubernetes version matrix
//!
//! Every supported Kubernetes version gets the same pair of end-to-end jobs:
//! one running the control plane components against local CRI endpoints and
//! one against remote CRI endpoints.

use crate::pipeline::document::{Job, Step};
use crate::pipeline::version::VersionIdentifier;

/// Environment variable carrying the version into e2e steps
pub const KUBERNETES_VERSION_ENV: &str = "KUBERNETES_VERSION";

/// Where the e2e tests reach the container runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriEndpoints {
    /// CRI sockets on the test host
    Local,
    /// CRI endpoints exposed over the network
    Remote,
}

impl CriEndpoints {
    /// Both endpoint kinds, in generation order
    pub const ALL: [Self; 2] = [Self::Local, Self::Remote];

    fn label(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }

    fn make_target(self) -> &'static str {
        match self {
            Self::Local => "make e2e",
            Self::Remote => "make e2e-remote",
        }
    }
}

/// Expands a version into its pair of e2e jobs, local endpoints first
#[must_use]
pub fn expand_version(version: &VersionIdentifier) -> [Job; 2] {
    CriEndpoints::ALL.map(|endpoints| e2e_job(version, endpoints))
}

fn e2e_job(version: &VersionIdentifier, endpoints: CriEndpoints) -> Job {
    let label = endpoints.label();
    Job::new(
        format!("e2e_{}_with_{label}_cri_endpoints", version.token()),
        format!("e2e tests ({version}) with {label} CRI endpoints"),
        vec![
            Step::bash("make deps", "Install host dependencies")
                .with_env(KUBERNETES_VERSION_ENV, version.as_str()),
            Step::bash(endpoints.make_target(), "Run end to end tests")
                .with_env(KUBERNETES_VERSION_ENV, version.as_str()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::Validate;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn version(raw: &str) -> VersionIdentifier {
        VersionIdentifier::new(raw).unwrap()
    }

    #[test]
    fn test_expand_produces_local_then_remote() {
        let [local, remote] = expand_version(&version("1.21.3"));

        assert_eq!(local.id, "e2e_1_21_3_with_local_cri_endpoints");
        assert_eq!(local.display_name, "e2e tests (1.21.3) with local CRI endpoints");
        assert_eq!(remote.id, "e2e_1_21_3_with_remote_cri_endpoints");
        assert_eq!(
            remote.display_name,
            "e2e tests (1.21.3) with remote CRI endpoints"
        );
    }

    #[test]
    fn test_expand_steps() {
        let [local, remote] = expand_version(&version("1.20.0"));

        assert_eq!(
            local.steps,
            vec![
                Step::bash("make deps", "Install host dependencies")
                    .with_env("KUBERNETES_VERSION", "1.20.0"),
                Step::bash("make e2e", "Run end to end tests")
                    .with_env("KUBERNETES_VERSION", "1.20.0"),
            ]
        );
        assert_eq!(remote.steps[0], local.steps[0]);
        assert_eq!(remote.steps[1].command, "make e2e-remote");
        assert_eq!(remote.steps[1].display_name, "Run end to end tests");
    }

    #[test]
    fn test_default_pseudo_version() {
        let [local, remote] = expand_version(&VersionIdentifier::default_version());
        assert_eq!(local.id, "e2e_default_with_local_cri_endpoints");
        assert_eq!(remote.id, "e2e_default_with_remote_cri_endpoints");
        assert_eq!(local.steps[0].env["KUBERNETES_VERSION"], "default");
    }

    #[test]
    fn test_dotted_and_dashed_versions_share_token() {
        let dotted = expand_version(&version("1.21.3"));
        let dashed = expand_version(&version("1-21-3"));
        assert_eq!(dotted[0].id, dashed[0].id);
        assert_eq!(dotted[1].id, dashed[1].id);
        // the raw version is kept in names and env
        assert_ne!(dotted[0].display_name, dashed[0].display_name);
    }

    proptest! {
        #[test]
        fn prop_job_ids_follow_token(raw in "[A-Za-z0-9]{1,12}") {
            let [local, remote] = expand_version(&version(&raw));
            prop_assert_eq!(local.id, format!("e2e_{raw}_with_local_cri_endpoints"));
            prop_assert_eq!(remote.id, format!("e2e_{raw}_with_remote_cri_endpoints"));
        }

        #[test]
        fn prop_expansion_is_deterministic_and_valid(raw in "[A-Za-z0-9][A-Za-z0-9._-]{0,15}") {
            let version = version(&raw);
            let first = expand_version(&version);
            prop_assert_eq!(&first, &expand_version(&version));
            for job in &first {
                prop_assert!(job.validate().is_ok());
            }
        }
    }
}
