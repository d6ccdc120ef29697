//! CLI tools for oi-releaser
//!
//! - `pipelines azure-test`: Generate the Azure Pipelines test pipeline
//! - `cluster apiserver-ca`: Print a cluster's API server CA certificate
//! - `completions`: Generate shell completions

pub mod cluster;
pub mod completions;
pub mod pipelines;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use oi_releaser::{Config, VersionIdentifier, init_logging};
use std::path::PathBuf;
use tracing::debug;

/// CLI arguments for oi-releaser
#[derive(Parser, Debug)]
#[command(name = "oi-releaser")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level, enables logging to stderr
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate CI pipelines
    #[command(subcommand)]
    Pipelines(PipelinesCommand),

    /// Inspect cluster manifests read from stdin
    #[command(subcommand)]
    Cluster(ClusterCommand),

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: ShellArg,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum PipelinesCommand {
    /// Generate the Azure Pipelines test pipeline
    AzureTest {
        /// Release metadata file (defaults to the configured one)
        #[arg(short, long)]
        release_file: Option<PathBuf>,
        /// Kubernetes version to test, overrides the release file (repeatable)
        #[arg(short = 'k', long = "kubernetes-version", value_name = "VERSION")]
        kubernetes_versions: Vec<VersionIdentifier>,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum ClusterCommand {
    /// Print the API server CA certificate of a cluster
    ApiserverCa {
        /// Cluster name
        #[arg(long = "cluster", value_name = "NAME")]
        cluster: String,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Build the CLI command for completion generation
pub fn build_cli() -> clap::Command {
    Args::command()
}

/// Picks the log level: `--log-level`, then `debug` under `OI_RELEASER_DEBUG`,
/// then the level of an explicit config file. `None` leaves logging off.
fn log_level<'a>(
    flag: Option<&'a str>,
    debug_env: bool,
    config_file: bool,
    config: &'a Config,
) -> Option<&'a str> {
    match flag {
        Some(level) => Some(level),
        None if debug_env => Some("debug"),
        None if config_file => Some(config.log_level.as_str()),
        None => None,
    }
}

/// Parse and execute CLI arguments
pub fn run() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => Config::default(),
    };

    let debug_env = std::env::var("OI_RELEASER_DEBUG").is_ok();
    let level = log_level(
        args.log_level.as_deref(),
        debug_env,
        args.config.is_some(),
        &config,
    );
    if let Some(level) = level {
        init_logging(level);
    }
    debug!(?config, "configuration loaded");

    match args.command {
        Command::Pipelines(PipelinesCommand::AzureTest {
            release_file,
            kubernetes_versions,
            output,
        }) => {
            let versions =
                pipelines::resolve_versions(kubernetes_versions, release_file.as_deref(), &config)?;
            let rendered = pipelines::azure_test(&versions)?;
            pipelines::write_output(&rendered, output.as_deref())?;
        }
        Command::Cluster(ClusterCommand::ApiserverCa { cluster }) => {
            cluster::apiserver_ca(&cluster)?;
        }
        Command::Completions { shell, output } => {
            use clap_complete::Shell;

            let shell_enum = match shell {
                ShellArg::Bash => Shell::Bash,
                ShellArg::Zsh => Shell::Zsh,
                ShellArg::Fish => Shell::Fish,
                ShellArg::PowerShell => Shell::PowerShell,
            };

            let completions = completions::generate_completions(shell_enum)?;

            if let Some(output_path) = output {
                completions::save_completions(&completions, &output_path)?;
            } else {
                println!("{completions}");
            }
        }
    }

    Ok(())
}
