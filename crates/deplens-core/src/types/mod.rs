//! Core data types for deplens.
//!
//! - Dependency sets keyed by bare package identifiers
//! - Best-effort extraction results carrying an optional diagnostic

pub mod dependency;
pub mod extraction;

// Re-export all public types
pub use dependency::DependencySet;
pub use extraction::Extraction;
