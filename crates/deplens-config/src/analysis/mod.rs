//! Analysis parameters and their validation

use std::time::Duration;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use url::Url;

use deplens_core::error::DeplensError;
use deplens_registry::{RegistryConfig, DEFAULT_REGISTRY_URL};
use crate::ConfigResult;

/// Keys accepted in a configuration file
pub const KNOWN_KEYS: [&str; 9] = [
    "package_name",
    "package_version",
    "repository_url",
    "test_mode",
    "fixture_path",
    "timeout_secs",
    "output_path",
    "substring_filter",
    "ascii_tree",
];

/// Complete analysis configuration; absent keys take their defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Package to analyse (required)
    pub package_name: String,

    /// Version to analyse; empty means latest
    pub package_version: String,

    /// Registry root
    pub repository_url: String,

    /// Read dependencies from `fixture_path` instead of the registry
    pub test_mode: bool,

    /// Fixture file used in test mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture_path: Option<Utf8PathBuf>,

    /// Per-request registry timeout in seconds
    pub timeout_secs: u64,

    /// Where the rendered diagram is written
    pub output_path: Utf8PathBuf,

    /// Dependencies whose name contains this are left out of the graph
    pub substring_filter: String,

    /// Print an ASCII tree in addition to writing the diagram
    pub ascii_tree: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            package_name: String::new(),
            package_version: String::new(),
            repository_url: DEFAULT_REGISTRY_URL.to_string(),
            test_mode: false,
            fixture_path: None,
            timeout_secs: 10,
            output_path: Utf8PathBuf::from("dependencies.mmd"),
            substring_filter: String::new(),
            ascii_tree: false,
        }
    }
}

impl AnalysisConfig {
    /// Check required fields and cross-field constraints
    pub fn validate(&self) -> ConfigResult<()> {
        if self.package_name.trim().is_empty() {
            return Err(DeplensError::config("package_name", "a package name is required"));
        }

        if self.test_mode {
            if self.fixture_path.is_none() {
                return Err(DeplensError::config(
                    "fixture_path",
                    "test mode requires a fixture file",
                ));
            }
        } else {
            if self.repository_url.is_empty() {
                return Err(DeplensError::config(
                    "repository_url",
                    "a registry URL is required outside test mode",
                ));
            }
            Url::parse(&self.repository_url).map_err(|e| {
                DeplensError::config(
                    "repository_url",
                    format!("'{}' is not a valid URL: {}", self.repository_url, e),
                )
            })?;
        }

        if self.timeout_secs == 0 {
            return Err(DeplensError::config("timeout_secs", "must be greater than zero"));
        }

        Ok(())
    }

    /// Client settings derived from this configuration
    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            base_url: self.repository_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..RegistryConfig::default()
        }
    }

    /// Effective parameters as ordered key/value pairs for display
    pub fn parameters(&self) -> Vec<(&'static str, String)> {
        vec![
            ("package_name", self.package_name.clone()),
            ("package_version", display_or(&self.package_version, "<latest>")),
            ("repository_url", self.repository_url.clone()),
            ("test_mode", self.test_mode.to_string()),
            (
                "fixture_path",
                self.fixture_path
                    .as_ref()
                    .map_or_else(|| "<none>".to_string(), |p| p.to_string()),
            ),
            ("timeout_secs", self.timeout_secs.to_string()),
            ("output_path", self.output_path.to_string()),
            ("substring_filter", display_or(&self.substring_filter, "<none>")),
            ("ascii_tree", self.ascii_tree.to_string()),
        ]
    }
}

fn display_or(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}
