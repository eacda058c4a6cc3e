//! Local fixture files standing in for the registry in test mode.
//!
//! A fixture is UTF-8 text naming packages separated by commas, by
//! whitespace, or a single name with no delimiter at all.

use camino::Utf8Path;
use tracing::{info, warn};

use deplens_core::{DependencySet, DeplensError, Extraction};

/// Parse fixture text into a dependency set.
///
/// Commas win over whitespace: `"a b, c"` yields `{"a b", "c"}`.
pub fn parse_fixture(content: &str) -> DependencySet {
    let content = content.trim();

    if content.contains(',') {
        content
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    } else if content.contains(char::is_whitespace) {
        content.split_whitespace().collect()
    } else if content.is_empty() {
        DependencySet::new()
    } else {
        std::iter::once(content).collect()
    }
}

/// Read and parse a fixture file; unreadable files yield an empty set and a diagnostic
pub async fn load_fixture(path: &Utf8Path) -> Extraction {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            let dependencies = parse_fixture(&content);
            info!("Loaded {} fixture dependencies from {}", dependencies.len(), path);
            Extraction::found(dependencies)
        },
        Err(source) => {
            let error = DeplensError::FixtureRead {
                path: path.to_string(),
                source,
            };
            warn!("{}", error);
            Extraction::failed(error)
        },
    }
}
