//! Metadata source abstraction
//!
//! The assembler only needs "metadata for a name". Putting that behind a trait
//! lets it run against the HTTP client in production and an in-memory table in
//! tests.

use async_trait::async_trait;

use crate::api::PackageMetadata;
use crate::client::RegistryClient;
use crate::RegistryResult;

/// Anything that can look up registry metadata for one package
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetch metadata for `package_name` with the registry error semantics
    async fn fetch_metadata(&self, package_name: &str) -> RegistryResult<PackageMetadata>;
}

#[async_trait]
impl MetadataSource for RegistryClient {
    async fn fetch_metadata(&self, package_name: &str) -> RegistryResult<PackageMetadata> {
        RegistryClient::fetch_metadata(self, package_name).await
    }
}
