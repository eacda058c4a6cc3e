//! Package registry client for deplens
//!
//! This crate performs single metadata lookups against a JSON package index
//! (`{base}/{package}/json`) and maps every failure onto the deplens error
//! taxonomy.

pub mod api;
pub mod client;
pub mod source;

// Re-export main types
pub use api::{PackageInfo, PackageMetadata, ReleaseFile};
pub use client::{RegistryClient, RegistryConfig, DEFAULT_REGISTRY_URL, DEFAULT_TIMEOUT};
pub use source::MetadataSource;

use deplens_core::error::DeplensError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, DeplensError>;
