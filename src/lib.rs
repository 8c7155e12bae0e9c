//! Weik.io MCP - tool server for the Weik.io integration platform
//!
//! Exposes a fixed set of tools to a calling agent:
//! - Weik.io CLI wrappers (list agents, apply a configuration)
//! - Integration advice (supported integration types, a Docker Compose file)
//! - Apache Camel metadata search over components and Kamelets
//!
//! # Architecture
//!
//! - **Metadata**: download-once cache of the Camel catalogs, normalization
//!   of the components document, queries and Markdown rendering
//! - **Weikio**: subprocess wrapper around the `weikio` executable
//! - **MCP**: JSON-RPC 2.0 over stdio and the tool dispatcher
//!
//! # Example
//!
//! ```ignore
//! use weikio_core::{McpServer, MetadataStore, ServerConfig, ToolHandler, WeikioCli};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::default();
//!     let store = MetadataStore::from_config(&config.metadata)?;
//!     let handler = ToolHandler::new(store, WeikioCli::new(config.weikio_bin));
//!
//!     McpServer::new(handler).run().await?;
//!     Ok(())
//! }
//! ```

pub mod compose;
pub mod config;
pub mod error;
pub mod integration_types;
pub mod mcp;
pub mod metadata;
pub mod weikio;

// Re-export commonly used types
pub use config::{MetadataConfig, ServerConfig};
pub use error::{Result, WeikioError};
pub use mcp::{McpServer, ToolHandler};
pub use metadata::{LoadState, MetadataCounts, MetadataSource, MetadataStore};
pub use weikio::WeikioCli;
