//! Second-tier extraction used when a release declares no requirements.
//!
//! Declared metadata is always trusted first. When it is missing the assembler
//! hands the release files to a `FallbackStrategy`; swapping the strategy is
//! how archive introspection would be added later.

use async_trait::async_trait;
use tracing::debug;

use deplens_core::{DeplensError, Extraction};
use deplens_registry::ReleaseFile;

/// Pluggable extraction over the files of one release
#[async_trait]
pub trait FallbackStrategy: Send + Sync {
    /// Name used in log output
    fn name(&self) -> &'static str;

    /// Extract dependencies for `package_name` at `version` from its release files
    async fn extract(&self, package_name: &str, version: &str, files: &[ReleaseFile]) -> Extraction;
}

/// Selects the release's wheel but does not download or unpack it.
///
/// Always yields an empty set with a `NoDependencyData` diagnostic, so
/// "unknown" stays distinguishable from "no dependencies".
#[derive(Debug, Clone, Copy, Default)]
pub struct WheelInspection;

#[async_trait]
impl FallbackStrategy for WheelInspection {
    fn name(&self) -> &'static str {
        "wheel-inspection"
    }

    async fn extract(&self, package_name: &str, version: &str, files: &[ReleaseFile]) -> Extraction {
        let reason = match files.iter().find(|file| file.is_wheel()) {
            Some(wheel) => {
                debug!(
                    "Skipping wheel inspection for {} {}: {}",
                    package_name,
                    version,
                    wheel.url.as_deref().unwrap_or("<no url>")
                );
                "requires_dist is absent and wheel inspection is not supported"
            },
            None if files.is_empty() => "requires_dist is absent and the release has no files",
            None => "requires_dist is absent and the release has no wheel",
        };

        Extraction::failed(DeplensError::NoDependencyData {
            name: package_name.to_string(),
            version: version.to_string(),
            reason: reason.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(packagetype: &str) -> ReleaseFile {
        ReleaseFile {
            packagetype: Some(packagetype.to_string()),
            url: Some(format!("https://files.example/pkg.{}", packagetype)),
            filename: None,
        }
    }

    #[tokio::test]
    async fn test_wheel_inspection_always_reports_unknown() {
        let files = vec![file("sdist"), file("bdist_wheel")];
        let extraction = WheelInspection.extract("pkg", "1.0", &files).await;

        assert!(extraction.dependencies.is_empty());
        assert!(!extraction.is_known());
        match extraction.diagnostic {
            Some(DeplensError::NoDependencyData { name, version, reason }) => {
                assert_eq!(name, "pkg");
                assert_eq!(version, "1.0");
                assert!(reason.contains("not supported"));
            }
            other => panic!("Expected NoDependencyData, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reason_without_wheel() {
        let extraction = WheelInspection.extract("pkg", "1.0", &[file("sdist")]).await;
        assert!(matches!(
            extraction.diagnostic,
            Some(DeplensError::NoDependencyData { ref reason, .. }) if reason.contains("no wheel")
        ));

        let extraction = WheelInspection.extract("pkg", "1.0", &[]).await;
        assert!(matches!(
            extraction.diagnostic,
            Some(DeplensError::NoDependencyData { ref reason, .. }) if reason.contains("no files")
        ));
    }
}
