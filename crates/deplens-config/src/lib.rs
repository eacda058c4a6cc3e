//! Configuration loading for deplens
//!
//! Reads analysis parameters from a TOML or JSON file, layers command-line
//! overrides on top and validates the result before any analysis runs.

pub mod analysis;
pub mod loader;

// Re-export main types
pub use analysis::{AnalysisConfig, KNOWN_KEYS};
pub use loader::{parse_config, ConfigFormat, ConfigLoader, ConfigOverrides};

use deplens_core::error::DeplensError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, DeplensError>;
