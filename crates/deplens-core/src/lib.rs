//! # deplens-core
//!
//! Core types and utilities shared across all deplens crates.
//!
//! This crate provides:
//! - `DependencySet`, the sorted set of bare package identifiers
//! - `Extraction`, a best-effort result pairing a set with an optional diagnostic
//! - `DeplensError` enum for unified error handling
//! - The requirement-specifier normalizer
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (DependencySet, Extraction)
//! - `error`: Error types and result aliases
//! - `requirement`: Requirement specifier parsing

pub mod error;
pub mod requirement;
pub mod types;

// Re-export commonly used types
pub use error::{DeplensError, DeplensResult};
pub use requirement::{normalize_requirement, RUNTIME_SENTINEL, VERSION_OPERATORS};
pub use types::{DependencySet, Extraction};
