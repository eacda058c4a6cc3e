//! Cross-checking dependency sets from two independent sources

use serde::Serialize;

use deplens_core::DependencySet;

/// Usual reasons two sources disagree about the same package
const DIVERGENCE_CAUSES: [&str; 4] = [
    "The installed version differs from the version analysed in the registry",
    "Dependencies guarded by extras or platform markers are reported differently",
    "The local installation predates the latest published metadata",
    "One source spells the package name differently (case, '-' vs '_')",
];

/// Outcome of comparing two dependency sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    pub set_a: DependencySet,
    pub set_b: DependencySet,
    pub only_in_a: DependencySet,
    pub only_in_b: DependencySet,
    pub matches: bool,
}

/// Compare two sets; order-independent and side-effect free
pub fn compare(set_a: &DependencySet, set_b: &DependencySet) -> ComparisonResult {
    ComparisonResult {
        only_in_a: set_a.difference(set_b),
        only_in_b: set_b.difference(set_a),
        matches: set_a == set_b,
        set_a: set_a.clone(),
        set_b: set_b.clone(),
    }
}

impl ComparisonResult {
    pub fn is_match(&self) -> bool {
        self.matches
    }

    /// Every identifier present in exactly one of the two sets
    pub fn symmetric_difference(&self) -> DependencySet {
        self.only_in_a
            .iter()
            .chain(self.only_in_b.iter())
            .map(String::as_str)
            .collect()
    }

    /// Likely causes of a divergence; empty for a match
    pub fn explanations(&self) -> &'static [&'static str] {
        if self.matches {
            &[]
        } else {
            &DIVERGENCE_CAUSES
        }
    }
}
