//! Weik.io MCP server
//!
//! Entry point: parses flags, sets up logging on stderr, warms the metadata
//! cache and serves MCP over stdio.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::EnvFilter;
use weikio_core::config::{default_metadata_dir, DEFAULT_METADATA_URL, DEFAULT_WEIKIO_BIN};
use weikio_core::{McpServer, MetadataConfig, MetadataStore, ServerConfig, ToolHandler, WeikioCli};

#[derive(Parser)]
#[command(name = "weikio-mcp")]
#[command(about = "MCP server for the Weik.io CLI and Apache Camel metadata", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Set log level
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Metadata cache directory
    #[arg(long, global = true, env = "WEIKIO_METADATA_DIR")]
    metadata_dir: Option<PathBuf>,

    /// Base URL the Camel metadata files are downloaded from
    #[arg(long, global = true, env = "WEIKIO_METADATA_URL", default_value = DEFAULT_METADATA_URL)]
    metadata_url: String,

    /// Weik.io CLI executable
    #[arg(long, global = true, env = "WEIKIO_BIN", default_value = DEFAULT_WEIKIO_BIN)]
    weikio_bin: String,

    /// Timeout for metadata downloads, in seconds
    #[arg(long, global = true, default_value = "30")]
    http_timeout_secs: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server (stdio mode, the default)
    Serve,

    /// Download or load the metadata cache and print catalog sizes
    Fetch,
}

impl Cli {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            metadata: MetadataConfig {
                metadata_dir: self
                    .metadata_dir
                    .clone()
                    .unwrap_or_else(default_metadata_dir),
                base_url: self.metadata_url.clone(),
                http_timeout: Duration::from_secs(self.http_timeout_secs),
            },
            weikio_bin: self.weikio_bin.clone(),
        }
    }
}

async fn start_mcp_server(config: ServerConfig) -> anyhow::Result<()> {
    debug!("Starting MCP server...");
    debug!("Using metadata directory: {}", config.metadata.metadata_dir.display());

    let store = MetadataStore::from_config(&config.metadata)
        .context("failed to create metadata store")?;
    let handler = ToolHandler::new(store, WeikioCli::new(config.weikio_bin));

    // A failed warm-up is retried on the first metadata tool call
    match handler.initialize_metadata().await {
        Ok(counts) => info!(
            "Metadata ready: {} components, {} kamelets, {} SPI beans",
            counts.components, counts.kamelets, counts.spi_beans
        ),
        Err(e) => warn!("Metadata initialization failed: {}", e),
    }

    let server = McpServer::new(handler);
    server.run().await?;

    Ok(())
}

async fn fetch_metadata(config: ServerConfig) -> anyhow::Result<()> {
    let mut store = MetadataStore::from_config(&config.metadata)
        .context("failed to create metadata store")?;
    store
        .initialize()
        .await
        .with_context(|| format!("failed to load metadata into {}", store.metadata_dir().display()))?;

    let counts = store.counts();
    println!("Metadata directory: {}", store.metadata_dir().display());
    println!("  Components: {}", counts.components);
    println!("  Kamelets:   {}", counts.kamelets);
    println!("  SPI beans:  {}", counts.spi_beans);

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let level = level.as_str().to_lowercase();
    let filter = EnvFilter::new(format!("weikio_mcp={level},weikio_core={level}"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // stdout carries protocol frames only
        .init();

    debug!("weikio-mcp v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = cli.server_config();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => start_mcp_server(config).await,
        Commands::Fetch => fetch_metadata(config).await,
    }
}
