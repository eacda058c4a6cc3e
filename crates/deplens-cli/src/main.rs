//! # deplens-cli
//!
//! Inspect the direct dependencies of Python packages.
//!
//! Entry point for the `deplens` tool. Parses the command line, sets up
//! logging and the panic hook, loads the analysis configuration and
//! dispatches to the command handlers.

use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use deplens_config::{ConfigLoader, ConfigOverrides};
use deplens_core::error::{DeplensError, DeplensResult};

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;
use output::render::GraphFormat;

/// Inspect the direct dependencies of Python packages
#[derive(Parser)]
#[command(name = "deplens", version, about = "Python package dependency inspector")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (.toml, .json or .conf)
    #[arg(short, long, global = true, env = "DEPLENS_CONFIG", default_value = "deplens.toml")]
    pub config: Utf8PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Flags that replace values from the configuration file
#[derive(Args, Debug, Default)]
pub struct OverrideArgs {
    /// Package to analyse
    #[arg(short, long, global = true)]
    pub package: Option<String>,

    /// Package version to analyse (latest when omitted)
    #[arg(long = "pkg-version", global = true, value_name = "VERSION")]
    pub package_version: Option<String>,

    /// Registry root URL
    #[arg(long, global = true, value_name = "URL")]
    pub registry: Option<String>,

    /// Read dependencies from the fixture file instead of the registry
    #[arg(long, global = true)]
    pub test_mode: bool,

    /// Fixture file used in test mode
    #[arg(long, global = true, value_name = "FILE")]
    pub fixture: Option<Utf8PathBuf>,
}

impl From<OverrideArgs> for ConfigOverrides {
    fn from(args: OverrideArgs) -> Self {
        ConfigOverrides {
            package_name: args.package,
            package_version: args.package_version,
            repository_url: args.registry,
            test_mode: args.test_mode.then_some(true),
            fixture_path: args.fixture,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the direct dependencies of the configured package
    Deps,
    /// Show the effective analysis parameters
    Config,
    /// Build a dependency graph and render it
    Graph {
        /// Output format
        #[arg(long, value_enum, default_value_t = GraphFormat::Mermaid)]
        format: GraphFormat,
        /// Additional root packages to fold into the graph
        #[arg(value_name = "PACKAGE")]
        roots: Vec<String>,
    },
    /// Compare registry metadata with the locally installed packages
    Compare {
        /// Packages to compare (defaults to the configured package)
        #[arg(value_name = "PACKAGE")]
        packages: Vec<String>,
        /// Interpreter whose package manager is queried
        #[arg(long, default_value = "python3")]
        python: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    info!("Starting deplens v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", ErrorFormatter::new().format_error(&error));
            ExitCode::FAILURE
        },
    }
}

fn run_cli(cli: Cli) -> DeplensResult<()> {
    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| DeplensError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let config = ConfigLoader::new(cli.config)
            .load(cli.overrides.into())
            .await?;
        let ctx = CommandContext::new(config)?;

        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    // RUST_LOG wins over the verbosity flag
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "deplens={level},deplens_core={level},deplens_registry={level},\
             deplens_resolver={level},deplens_config={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("deplens encountered an unexpected error: {}", panic_info);
        eprintln!("deplens crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/deplens/deplens/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
