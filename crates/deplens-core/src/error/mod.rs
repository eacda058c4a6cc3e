//! Error types and result aliases for deplens operations.
//!
//! Every registry, fixture and local-tool failure is recoverable: callers turn
//! it into an empty result plus a diagnostic. Only configuration errors stop
//! a run.

use thiserror::Error;

/// Unified error type for all deplens operations
#[derive(Error, Debug)]
pub enum DeplensError {
    // Registry errors
    #[error("Package '{name}' not found in registry")]
    NotFound { name: String },

    #[error("Registry returned HTTP {status} for '{name}'")]
    Registry { name: String, status: u16 },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Malformed registry response for '{name}': {message}")]
    Protocol { name: String, message: String },

    // Resolution errors
    #[error("Could not determine a version for '{name}'")]
    UnresolvedVersion { name: String },

    #[error("Version {version} not found for package '{name}'")]
    VersionNotFound { name: String, version: String },

    #[error("No dependency metadata available for {name} {version}: {reason}")]
    NoDependencyData {
        name: String,
        version: String,
        reason: String,
    },

    // Local sources
    #[error("Failed to read fixture '{path}'")]
    FixtureRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No fixture data for '{name}': the fixture only describes '{fixture_package}'")]
    OutsideFixture { name: String, fixture_package: String },

    #[error("{tool} failed: {message}")]
    LocalTool { tool: String, message: String },

    // Config errors
    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    #[error("Failed to parse configuration {path}: {message}")]
    ConfigParse { path: String, message: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for deplens operations
pub type DeplensResult<T> = Result<T, DeplensError>;

impl DeplensError {
    /// Create a network error from any error type
    pub fn network<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Create a configuration validation error
    pub fn config(field: &str, reason: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether analysis of other packages may continue after this error.
    ///
    /// Configuration errors are the only fatal kind.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            DeplensError::ConfigValidation { .. } | DeplensError::ConfigParse { .. }
        )
    }

    /// Short label used when printing diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            DeplensError::NotFound { .. } => "package not found",
            DeplensError::Registry { .. } => "registry error",
            DeplensError::Network { .. } => "network unreachable",
            DeplensError::Protocol { .. } => "protocol error",
            DeplensError::UnresolvedVersion { .. } | DeplensError::VersionNotFound { .. } => {
                "version not found"
            },
            DeplensError::NoDependencyData { .. } => "no dependency metadata available",
            DeplensError::FixtureRead { .. } => "fixture unreadable",
            DeplensError::OutsideFixture { .. } => "not covered by fixture",
            DeplensError::LocalTool { .. } => "local tool failed",
            DeplensError::ConfigValidation { .. } | DeplensError::ConfigParse { .. } => {
                "invalid configuration"
            },
            DeplensError::Io { .. } => "io error",
        }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            DeplensError::NotFound { .. } => {
                Some("Check the package name spelling or the repository_url setting")
            },
            DeplensError::Network { .. } => Some("Check your internet connection and try again"),
            DeplensError::Registry { .. } => Some("The registry may be degraded; retry later"),
            DeplensError::VersionNotFound { .. } | DeplensError::UnresolvedVersion { .. } => {
                Some("Leave package_version empty to analyse the latest release")
            },
            DeplensError::NoDependencyData { .. } => {
                Some("The package publishes no requires_dist; its dependencies are unknown, not absent")
            },
            DeplensError::OutsideFixture { .. } => {
                Some("Test mode only knows the configured package; drop --test-mode to query the registry")
            },
            DeplensError::LocalTool { .. } => {
                Some("Install the package locally or pass --python to select an interpreter")
            },
            DeplensError::ConfigValidation { .. } => {
                Some("Fix the configuration file or pass the value as a command-line flag")
            },
            _ => None,
        }
    }
}
