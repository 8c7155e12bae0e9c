//! Remote metadata sources
//!
//! The store only needs "give me the text of this resource", so downloads
//! sit behind [`MetadataSource`]. [`HttpMetadataSource`] is the production
//! implementation.

use crate::config::MetadataConfig;
use crate::error::{Result, WeikioError};
use async_trait::async_trait;
use tracing::debug;

/// The three files making up the Camel metadata catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataResource {
    Components,
    Kamelets,
    SpiBeans,
}

impl MetadataResource {
    /// File name, both remotely and in the cache directory
    pub fn file_name(&self) -> &'static str {
        match self {
            MetadataResource::Components => "components.json",
            MetadataResource::Kamelets => "kamelets.yaml",
            MetadataResource::SpiBeans => "spiBeans.json",
        }
    }

    /// Remote location under a base URL
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.file_name())
    }
}

/// Something that can fetch the raw text of a metadata resource
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetch the full body of `resource`
    async fn fetch(&self, resource: MetadataResource) -> Result<String>;

    /// Human-readable location, for logs
    fn describe(&self, resource: MetadataResource) -> String;
}

/// Fetches metadata over HTTP(S)
pub struct HttpMetadataSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMetadataSource {
    /// Create a source from the metadata configuration
    pub fn new(config: &MetadataConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("weikio-mcp/", env!("CARGO_PKG_VERSION")))
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl MetadataSource for HttpMetadataSource {
    async fn fetch(&self, resource: MetadataResource) -> Result<String> {
        let url = resource.url(&self.base_url);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        debug!("Response received, status: {}", status);

        if !status.is_success() {
            return Err(WeikioError::FetchStatus {
                url,
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    fn describe(&self, resource: MetadataResource) -> String {
        resource.url(&self.base_url)
    }
}
