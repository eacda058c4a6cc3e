//! HTTP client for registry metadata lookups

use std::time::Duration;
use reqwest::{header, Client, ClientBuilder, StatusCode};
use tracing::debug;
use url::Url;

use deplens_core::error::DeplensError;
use crate::api::PackageMetadata;
use crate::RegistryResult;

/// Default registry root (a PyPI-compatible JSON API)
pub const DEFAULT_REGISTRY_URL: &str = "https://pypi.org/pypi";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Explicit client configuration, passed in rather than read from globals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Registry root; metadata lives at `{base_url}/{package}/json`
    pub base_url: String,
    /// Bound on a single request, connect through body
    pub timeout: Duration,
    /// Client identifier sent with every request
    pub user_agent: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REGISTRY_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("deplens/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl RegistryConfig {
    /// Default configuration pointed at another registry root
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Stateless registry client; only the connection pool and headers are shared
#[derive(Debug, Clone)]
pub struct RegistryClient {
    /// Underlying HTTP client with connection pooling
    client: Client,
    /// Parsed registry root
    base_url: Url,
    config: RegistryConfig,
}

impl RegistryClient {
    /// Create a client for the default registry
    pub fn new() -> RegistryResult<Self> {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a client with explicit configuration
    pub fn with_config(config: RegistryConfig) -> RegistryResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            DeplensError::config("repository_url", format!("'{}' is not a valid URL: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(DeplensError::config(
                "repository_url",
                format!("'{}' cannot be used as a registry root", config.base_url),
            ));
        }

        let client = ClientBuilder::new()
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(config.timeout)
            .gzip(true)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| DeplensError::network(format!("Failed to create HTTP client: {}", e), e))?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Fetch package metadata with a single request.
    ///
    /// 404 maps to `NotFound`, other non-2xx statuses to `Registry`, transport
    /// failures (including timeouts) to `Network` and unparseable bodies to
    /// `Protocol`. No retries.
    pub async fn fetch_metadata(&self, package_name: &str) -> RegistryResult<PackageMetadata> {
        let url = self.metadata_url(package_name);
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                DeplensError::network(format!("Failed to fetch metadata for {}: {}", package_name, e), e)
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(DeplensError::NotFound {
                name: package_name.to_string(),
            }),
            status if !status.is_success() => Err(DeplensError::Registry {
                name: package_name.to_string(),
                status: status.as_u16(),
            }),
            _ => {
                let body = response.text().await.map_err(|e| {
                    DeplensError::network(format!("Failed to read metadata for {}: {}", package_name, e), e)
                })?;
                serde_json::from_str(&body).map_err(|e| DeplensError::Protocol {
                    name: package_name.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// `{base}/{package}/json`, with the name percent-encoded as one segment
    fn metadata_url(&self, package_name: &str) -> Url {
        let mut url = self.base_url.clone();
        // with_config rejects cannot-be-a-base URLs, so segments are always available
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(package_name).push("json");
        }
        url
    }
}
