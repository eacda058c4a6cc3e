//! Dependency extraction and comparison engine for deplens
//!
//! This crate turns registry metadata (or a local fixture) into direct
//! dependency sets, cross-checks them against a second source and folds
//! them into a leveled dependency graph.

pub mod assembler;
pub mod compare;
pub mod fallback;
pub mod fixture;
pub mod graph;
pub mod installed;

// Re-export main types
pub use assembler::{dependencies_from_specifiers, DependencyAssembler};
pub use compare::{compare, ComparisonResult};
pub use fallback::{FallbackStrategy, WheelInspection};
pub use fixture::{load_fixture, parse_fixture};
pub use graph::{DependencyGraph, PackageNode};
pub use installed::{parse_pip_show, InstalledPackages};
