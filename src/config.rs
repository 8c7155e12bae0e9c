//! Runtime configuration for the metadata store and the MCP server
//!
//! Values come from CLI flags or environment variables (resolved by clap in
//! the binary); this module supplies the defaults.

use std::path::PathBuf;
use std::time::Duration;

/// Upstream location of the Camel metadata files
pub const DEFAULT_METADATA_URL: &str =
    "https://raw.githubusercontent.com/apache/camel-karavan/main/karavan-vscode/metadata";

/// Default Weik.io CLI executable
pub const DEFAULT_WEIKIO_BIN: &str = "weikio";

/// Default HTTP timeout for metadata downloads
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Get the default metadata cache directory using XDG_DATA_HOME
pub fn default_metadata_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("weikio-mcp")
        .join("metadata")
}

/// Where metadata is cached and fetched from
#[derive(Debug, Clone)]
pub struct MetadataConfig {
    /// Directory holding components.json, kamelets.yaml and spiBeans.json
    pub metadata_dir: PathBuf,

    /// Base URL the three metadata files are fetched from
    pub base_url: String,

    /// Request timeout for downloads
    pub http_timeout: Duration,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            metadata_dir: default_metadata_dir(),
            base_url: DEFAULT_METADATA_URL.to_string(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

impl MetadataConfig {
    /// Config rooted at a specific cache directory, default source
    pub fn with_dir(metadata_dir: impl Into<PathBuf>) -> Self {
        Self {
            metadata_dir: metadata_dir.into(),
            ..Self::default()
        }
    }
}

/// Full server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub metadata: MetadataConfig,

    /// Path or name of the Weik.io CLI executable
    pub weikio_bin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            metadata: MetadataConfig::default(),
            weikio_bin: DEFAULT_WEIKIO_BIN.to_string(),
        }
    }
}
