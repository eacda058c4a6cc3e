//! Direct dependency assembly from registry metadata
//!
//! Two tiers: declared `requires_dist` entries are trusted first; when a
//! release declares nothing, the configured `FallbackStrategy` gets the
//! release files. Every failure along the way becomes an empty set plus a
//! diagnostic so a batch keeps going.

use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use deplens_core::{normalize_requirement, DependencySet, DeplensError, Extraction, RUNTIME_SENTINEL};
use deplens_registry::MetadataSource;

use crate::fallback::{FallbackStrategy, WheelInspection};

/// Builds the direct dependency set of a package from a metadata source
pub struct DependencyAssembler<S> {
    source: S,
    fallback: Box<dyn FallbackStrategy>,
}

impl<S: MetadataSource> DependencyAssembler<S> {
    /// Create an assembler with the default fallback
    pub fn new(source: S) -> Self {
        Self::with_fallback(source, Box::new(WheelInspection))
    }

    /// Create an assembler with a custom second-tier strategy
    pub fn with_fallback(source: S, fallback: Box<dyn FallbackStrategy>) -> Self {
        Self { source, fallback }
    }

    /// Direct dependencies of `package_name` at `requested_version`.
    ///
    /// An empty `requested_version` selects the latest version the registry
    /// reports. Never fails: problems are returned as the diagnostic.
    pub async fn assemble(&self, package_name: &str, requested_version: &str) -> Extraction {
        let metadata = match self.source.fetch_metadata(package_name).await {
            Ok(metadata) => metadata,
            Err(error) => return degraded(error),
        };

        let version = if requested_version.is_empty() {
            match metadata.latest_version() {
                Some(latest) => latest.to_string(),
                None => {
                    return degraded(DeplensError::UnresolvedVersion {
                        name: package_name.to_string(),
                    })
                },
            }
        } else {
            requested_version.to_string()
        };
        debug!("Resolved {} to version {}", package_name, version);

        if !metadata.has_release(&version) {
            return degraded(DeplensError::VersionNotFound {
                name: package_name.to_string(),
                version,
            });
        }

        let specifiers = metadata.requirement_specifiers();
        if !specifiers.is_empty() {
            let dependencies = dependencies_from_specifiers(specifiers.iter().map(String::as_str));
            info!(
                "Found {} dependencies for {} {} in package metadata",
                dependencies.len(),
                package_name,
                version
            );
            return Extraction::found(dependencies);
        }

        info!(
            "No requires_dist for {} {}, falling back to {}",
            package_name,
            version,
            self.fallback.name()
        );
        let extraction = self
            .fallback
            .extract(package_name, &version, metadata.release_files(&version))
            .await;
        if let Some(diagnostic) = &extraction.diagnostic {
            warn!("{}", diagnostic);
        }
        extraction
    }

    /// Analyse several packages at their latest versions, one after another.
    ///
    /// Names are deduplicated and processed in sorted order; a failure for
    /// one package is recorded in its extraction and does not stop the rest.
    pub async fn assemble_batch<'a, I>(&self, package_names: I) -> Vec<(String, Extraction)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: BTreeSet<&str> = package_names.into_iter().collect();
        let mut results = Vec::with_capacity(names.len());
        for name in names {
            results.push((name.to_string(), self.assemble(name, "").await));
        }
        results
    }
}

/// Normalize raw specifiers into a set, dropping empties and the runtime sentinel
pub fn dependencies_from_specifiers<'a, I>(specifiers: I) -> DependencySet
where
    I: IntoIterator<Item = &'a str>,
{
    specifiers
        .into_iter()
        .filter_map(normalize_requirement)
        .filter(|name| name != RUNTIME_SENTINEL)
        .collect()
}

fn degraded(error: DeplensError) -> Extraction {
    warn!("{}: {}", error.kind(), error);
    Extraction::failed(error)
}
