//! Command implementations and dispatch logic.
//!
//! Each command is an async function taking a `CommandContext`, which holds
//! the validated configuration and the dependency source chosen from it.

use camino::Utf8PathBuf;
use tracing::info;

use deplens_config::AnalysisConfig;
use deplens_core::error::{DeplensError, DeplensResult};
use deplens_core::Extraction;
use deplens_registry::RegistryClient;
use deplens_resolver::{load_fixture, DependencyAssembler};

pub mod compare;
pub mod config;
pub mod deps;
pub mod graph;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands};

/// Where direct dependencies come from for this run
pub enum DependencySource {
    /// Test mode: a local file describing the configured package only
    Fixture { package: String, path: Utf8PathBuf },
    /// The package registry
    Registry(DependencyAssembler<RegistryClient>),
}

impl DependencySource {
    /// Pick the source the configuration asks for
    pub fn from_config(config: &AnalysisConfig) -> DeplensResult<Self> {
        if config.test_mode {
            let path = config.fixture_path.clone().ok_or_else(|| {
                DeplensError::config("fixture_path", "test mode requires a fixture file")
            })?;
            return Ok(Self::Fixture {
                package: config.package_name.clone(),
                path,
            });
        }

        let client = RegistryClient::with_config(config.registry_config())?;
        Ok(Self::Registry(DependencyAssembler::new(client)))
    }

    /// Direct dependencies of `name` at `version` (empty for latest)
    pub async fn direct_dependencies(&self, name: &str, version: &str) -> Extraction {
        match self {
            Self::Fixture { package, path } if package == name => load_fixture(path).await,
            Self::Fixture { package, .. } => Extraction::failed(DeplensError::OutsideFixture {
                name: name.to_string(),
                fixture_package: package.clone(),
            }),
            Self::Registry(assembler) => assembler.assemble(name, version).await,
        }
    }
}

/// Shared context for all commands
pub struct CommandContext {
    pub config: AnalysisConfig,
    pub output: OutputHandler,
    pub source: DependencySource,
}

impl CommandContext {
    /// Create a command context from a validated configuration
    pub fn new(config: AnalysisConfig) -> DeplensResult<Self> {
        Self::with_output(config, OutputHandler::new())
    }

    pub fn with_output(config: AnalysisConfig, output: OutputHandler) -> DeplensResult<Self> {
        let source = DependencySource::from_config(&config)?;
        Ok(Self {
            config,
            output,
            source,
        })
    }

    /// Direct dependencies, with any diagnostic shown to the user
    pub async fn direct_dependencies(&self, name: &str, version: &str) -> Extraction {
        let extraction = self.source.direct_dependencies(name, version).await;
        if let Some(diagnostic) = &extraction.diagnostic {
            self.output.diagnostic(diagnostic);
        }
        extraction
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> DeplensResult<()> {
    match command {
        Commands::Deps => {
            info!("Listing dependencies of {}", ctx.config.package_name);
            deps::execute(ctx).await
        },
        Commands::Config => config::execute(ctx).await,
        Commands::Graph { format, roots } => {
            info!("Building {:?} graph (extra roots: {:?})", format, roots);
            graph::execute(format, roots, ctx).await
        },
        Commands::Compare { packages, python } => {
            info!("Comparing registry metadata with {} installations", python);
            compare::execute(packages, python, ctx).await
        },
    }
}

/// `name` or `name==version` for messages
pub fn package_label(name: &str, version: &str) -> String {
    if version.is_empty() {
        name.to_string()
    } else {
        format!("{}=={}", name, version)
    }
}
