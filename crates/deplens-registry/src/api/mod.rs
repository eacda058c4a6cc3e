//! Registry JSON API response types
//!
//! Every field the tool reads is optional or defaulted, so a sparse or
//! partially populated response deserialises and the gaps are checked by the
//! caller instead of failing the parse.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Package type label for binary wheel distributions
pub const WHEEL_PACKAGE_TYPE: &str = "bdist_wheel";

/// Package metadata response from the registry
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PackageMetadata {
    /// Summary block for the latest (or requested) release
    #[serde(default)]
    pub info: PackageInfo,
    /// All releases keyed by version string
    #[serde(default)]
    pub releases: HashMap<String, Vec<ReleaseFile>>,
}

/// The `info` block of a registry response
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PackageInfo {
    /// Canonical package name
    pub name: Option<String>,
    /// Latest version
    pub version: Option<String>,
    /// Short description
    pub summary: Option<String>,
    /// Raw requirement specifiers, `null` when the package declares none
    pub requires_dist: Option<Vec<String>>,
}

/// One downloadable file of a release
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReleaseFile {
    /// Distribution type (`sdist`, `bdist_wheel`, ...)
    pub packagetype: Option<String>,
    /// Download URL
    pub url: Option<String>,
    /// File name
    pub filename: Option<String>,
}

impl PackageMetadata {
    /// Latest version reported by the registry, if non-empty
    pub fn latest_version(&self) -> Option<&str> {
        self.info.version.as_deref().filter(|v| !v.is_empty())
    }

    /// Whether the release listing contains `version`
    pub fn has_release(&self, version: &str) -> bool {
        self.releases.contains_key(version)
    }

    /// Files published for `version` (empty when unknown)
    pub fn release_files(&self, version: &str) -> &[ReleaseFile] {
        self.releases.get(version).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Declared requirement specifiers (empty when absent or `null`)
    pub fn requirement_specifiers(&self) -> &[String] {
        self.info.requires_dist.as_deref().unwrap_or(&[])
    }
}

impl ReleaseFile {
    /// Check if this file is a binary wheel
    pub fn is_wheel(&self) -> bool {
        self.packagetype.as_deref() == Some(WHEEL_PACKAGE_TYPE)
    }
}
