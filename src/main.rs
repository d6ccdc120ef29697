//! oi-releaser - release tooling for oneinfra
//!
//! ## Commands
//!
//! - `oi-releaser pipelines azure-test` - Generate the Azure Pipelines test pipeline
//! - `oi-releaser cluster apiserver-ca --cluster NAME` - Print a cluster's API server CA
//! - `oi-releaser completions` - Generate shell completions
//!
//! ## Quick Start
//!
//! ```bash
//! # Regenerate the test pipeline from the RELEASE file
//! oi-releaser pipelines azure-test > .azure-pipelines/test.yml
//!
//! # Test specific Kubernetes versions only
//! oi-releaser pipelines azure-test -k 1.20.6 -k 1.21.0
//!
//! # Extract the API server CA from a manifest stream
//! oi-releaser cluster apiserver-ca --cluster prod < cluster.conf
//! ```
//!
//! Set `OI_RELEASER_DEBUG` to log to stderr, `OI_RELEASER_VERBOSE` for the
//! full error chain.

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if std::env::var("OI_RELEASER_VERBOSE").is_ok() {
                eprintln!("{e:?}");
            }
            ExitCode::FAILURE
        }
    }
}
