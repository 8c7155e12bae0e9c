//! Error types for the Weik.io MCP server
//!
//! Structured error definitions use thiserror; anyhow errors from the
//! binary layer are folded into [`WeikioError::Other`].

use thiserror::Error;

/// Main error type for Weik.io MCP operations
#[derive(Error, Debug)]
pub enum WeikioError {
    /// I/O error (cache directory, cache files, stdio)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parse error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote metadata source answered with a non-success status
    #[error("Failed to fetch {url}: HTTP {status}")]
    FetchStatus { url: String, status: u16 },

    /// A cached metadata file could not be parsed
    #[error("Corrupt metadata cache {path}: {reason}")]
    CacheParse { path: String, reason: String },

    /// The Weik.io CLI failed or wrote to stderr
    #[error("Weik.io CLI error: {0}")]
    Cli(String),

    /// Tool invoked with missing or malformed arguments
    #[error("{0}")]
    InvalidParams(String),

    /// Tool name not in the catalog
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for Weik.io MCP operations
pub type Result<T> = std::result::Result<T, WeikioError>;

/// Convert anyhow::Error to WeikioError
impl From<anyhow::Error> for WeikioError {
    fn from(err: anyhow::Error) -> Self {
        WeikioError::Other(err.to_string())
    }
}
