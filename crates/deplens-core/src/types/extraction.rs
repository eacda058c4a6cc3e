//! Best-effort extraction results.
//!
//! Sources never fail hard. They return the dependencies they could find and,
//! when something went wrong, the error that explains why the set is empty.

use super::DependencySet;
use crate::error::DeplensError;

/// Dependency set plus the diagnostic explaining a degraded result
#[derive(Debug, Default)]
pub struct Extraction {
    pub dependencies: DependencySet,
    pub diagnostic: Option<DeplensError>,
}

impl Extraction {
    /// A complete result with no diagnostic
    pub fn found(dependencies: DependencySet) -> Self {
        Self {
            dependencies,
            diagnostic: None,
        }
    }

    /// An empty result explained by `diagnostic`
    pub fn failed(diagnostic: DeplensError) -> Self {
        Self {
            dependencies: DependencySet::new(),
            diagnostic: Some(diagnostic),
        }
    }

    /// Whether the set reflects what the source actually declares.
    ///
    /// An empty set with no diagnostic means "no dependencies"; an empty set
    /// with a diagnostic means "unknown".
    pub fn is_known(&self) -> bool {
        self.diagnostic.is_none()
    }

    pub fn into_dependencies(self) -> DependencySet {
        self.dependencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_empty_vs_unknown_empty() {
        let none = Extraction::found(DependencySet::new());
        assert!(none.is_known());
        assert!(none.dependencies.is_empty());

        let unknown = Extraction::failed(DeplensError::NoDependencyData {
            name: "pkg".to_string(),
            version: "1.0".to_string(),
            reason: "no requires_dist".to_string(),
        });
        assert!(!unknown.is_known());
        assert!(unknown.dependencies.is_empty());
    }

    #[test]
    fn test_into_dependencies() {
        let names: DependencySet = ["idna", "certifi"].into_iter().collect();
        let extraction = Extraction::found(names.clone());
        assert_eq!(extraction.into_dependencies(), names);
    }
}
