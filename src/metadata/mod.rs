//! Apache Camel metadata store
//!
//! Holds the component, kamelet and SPI bean catalogs in memory. The first
//! call to [`MetadataStore::initialize`] loads each catalog from the local
//! cache directory, downloading (and caching) whatever is missing:
//!
//! ```text
//! metadata_dir/
//!     components.json   ← normalized component array, pretty-printed
//!     kamelets.yaml     ← verbatim multi-document download
//!     spiBeans.json     ← SPI bean array, pretty-printed
//! ```
//!
//! Queries are linear scans in load order.

pub mod format;
mod lenient;
pub mod normalize;
pub mod source;
pub mod types;

pub use format::{component_summary, format_component_details, format_kamelet_details, kamelet_summary};
pub use normalize::{normalize_components, parse_components_document, ComponentLayout};
pub use source::{HttpMetadataSource, MetadataResource, MetadataSource};
pub use types::{Component, Kamelet, Property, SpiBean};

use crate::config::MetadataConfig;
use crate::error::{Result, WeikioError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, error, info, warn};

/// Lifecycle of the store
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing loaded yet
    #[default]
    Uninitialized,
    /// All three catalogs loaded; terminal
    Ready,
    /// Last initialization failed; the next call retries
    Failed(String),
}

/// Number of records per catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetadataCounts {
    pub components: usize,
    pub kamelets: usize,
    pub spi_beans: usize,
}

/// In-memory Camel catalog backed by a cache directory
pub struct MetadataStore {
    metadata_dir: PathBuf,
    source: Arc<dyn MetadataSource>,
    components: Vec<Component>,
    kamelets: Vec<Kamelet>,
    spi_beans: Vec<SpiBean>,
    state: LoadState,
}

impl MetadataStore {
    /// Create an empty store caching into `metadata_dir`
    pub fn new(metadata_dir: impl Into<PathBuf>, source: Arc<dyn MetadataSource>) -> Self {
        Self {
            metadata_dir: metadata_dir.into(),
            source,
            components: Vec::new(),
            kamelets: Vec::new(),
            spi_beans: Vec::new(),
            state: LoadState::Uninitialized,
        }
    }

    /// Create a store that downloads over HTTP per the configuration
    pub fn from_config(config: &MetadataConfig) -> Result<Self> {
        let source = HttpMetadataSource::new(config)?;
        Ok(Self::new(config.metadata_dir.clone(), Arc::new(source)))
    }

    /// Load every catalog, once.
    ///
    /// Returns immediately when the store is already ready. On failure the
    /// error is returned and the next call starts over; catalogs loaded by
    /// earlier steps of the failed attempt stay in memory.
    pub async fn initialize(&mut self) -> Result<()> {
        if self.state == LoadState::Ready {
            return Ok(());
        }

        match self.load_all().await {
            Ok(()) => {
                self.state = LoadState::Ready;
                let counts = self.counts();
                info!(
                    "Metadata loaded: {} components, {} kamelets, {} SPI beans",
                    counts.components, counts.kamelets, counts.spi_beans
                );
                Ok(())
            }
            Err(e) => {
                error!("Failed to initialize metadata store: {}", e);
                self.state = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    async fn load_all(&mut self) -> Result<()> {
        fs::create_dir_all(&self.metadata_dir).await?;

        self.load_or_download_components().await?;
        self.load_or_download_kamelets().await?;
        self.load_or_download_spi_beans().await?;
        Ok(())
    }

    async fn load_or_download_components(&mut self) -> Result<()> {
        let path = self.cache_path(MetadataResource::Components);

        if !fs::try_exists(&path).await? {
            return self.download_components().await;
        }

        debug!("Using cached components from {}", path.display());
        let bytes = fs::read(&path).await?;

        // Invalid UTF-8 is a parse failure like any other
        match serde_json::from_slice::<serde_json::Value>(&bytes) {
            Ok(doc) => {
                self.components = normalize_components(&doc);
                info!("Loaded {} components from cache", self.components.len());
                Ok(())
            }
            Err(e) => {
                warn!(
                    "Error parsing cached components {}: {}; downloading fresh copy",
                    path.display(),
                    e
                );
                self.download_components().await
            }
        }
    }

    async fn download_components(&mut self) -> Result<()> {
        let resource = MetadataResource::Components;
        info!("Downloading components from {}", self.source.describe(resource));

        let body = self.source.fetch(resource).await?;
        let components = match parse_components_document(&body) {
            Ok(doc) => normalize_components(&doc),
            Err(e) => {
                warn!("Error parsing components response: {}", e);
                Vec::new()
            }
        };
        info!("Downloaded {} components", components.len());

        if components.is_empty() {
            warn!("No components were downloaded, not updating cache file");
        } else {
            let pretty = serde_json::to_string_pretty(&components)?;
            write_cache(&self.cache_path(resource), &pretty).await?;
        }

        self.components = components;
        Ok(())
    }

    async fn load_or_download_kamelets(&mut self) -> Result<()> {
        let resource = MetadataResource::Kamelets;
        let path = self.cache_path(resource);

        if fs::try_exists(&path).await? {
            debug!("Using cached kamelets from {}", path.display());
            let text = fs::read_to_string(&path).await?;
            self.kamelets = parse_kamelets(&text).map_err(|e| cache_error(&path, e))?;
            info!("Loaded {} kamelets from cache", self.kamelets.len());
            return Ok(());
        }

        info!("Downloading kamelets from {}", self.source.describe(resource));
        let body = self.source.fetch(resource).await?;
        let kamelets = parse_kamelets(&body)?;
        info!("Downloaded {} kamelets", kamelets.len());

        if kamelets.is_empty() {
            warn!("No kamelets were downloaded, not updating cache file");
        } else {
            // Cached verbatim so the multi-document layout survives
            write_cache(&path, &body).await?;
        }

        self.kamelets = kamelets;
        Ok(())
    }

    async fn load_or_download_spi_beans(&mut self) -> Result<()> {
        let resource = MetadataResource::SpiBeans;
        let path = self.cache_path(resource);

        if fs::try_exists(&path).await? {
            debug!("Using cached SPI beans from {}", path.display());
            let text = fs::read_to_string(&path).await?;
            self.spi_beans = serde_json::from_str(&text).map_err(|e| cache_error(&path, e))?;
            return Ok(());
        }

        info!("Downloading SPI beans from {}", self.source.describe(resource));
        let body = self.source.fetch(resource).await?;
        let spi_beans: Vec<SpiBean> = serde_json::from_str(&body)?;

        if spi_beans.is_empty() {
            warn!("No SPI beans were downloaded, not updating cache file");
        } else {
            write_cache(&path, &serde_json::to_string_pretty(&spi_beans)?).await?;
        }

        self.spi_beans = spi_beans;
        Ok(())
    }

    /// Cache file location for a resource
    pub fn cache_path(&self, resource: MetadataResource) -> PathBuf {
        self.metadata_dir.join(resource.file_name())
    }

    pub fn metadata_dir(&self) -> &Path {
        &self.metadata_dir
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// Components whose name, description, label or scheme contain `query`
    /// (case-insensitive), in load order
    pub fn search_components(&self, query: &str) -> Vec<&Component> {
        let query = query.to_lowercase();

        let results: Vec<&Component> = self
            .components
            .iter()
            .filter(|c| {
                [
                    c.name.as_deref(),
                    c.description.as_deref(),
                    c.label.as_deref(),
                    c.scheme.as_deref(),
                ]
                .into_iter()
                .any(|field| contains_ignore_case(field, &query))
            })
            .collect();

        debug!(
            "Found {} of {} components matching {:?}",
            results.len(),
            self.components.len(),
            query
        );
        results
    }

    /// First component whose name equals `name`, ignoring case
    pub fn get_component(&self, name: &str) -> Option<&Component> {
        let name = name.to_lowercase();
        self.components
            .iter()
            .find(|c| c.name.as_deref().is_some_and(|n| n.to_lowercase() == name))
    }

    /// Kamelets whose name, title or description contain `query`
    /// (case-insensitive). Kamelets without metadata or a definition never
    /// match.
    pub fn search_kamelets(&self, query: &str) -> Vec<&Kamelet> {
        let query = query.to_lowercase();

        self.kamelets
            .iter()
            .filter(|k| {
                let (Some(metadata), Some(definition)) = (&k.metadata, k.definition()) else {
                    return false;
                };
                [
                    metadata.name.as_deref(),
                    definition.title.as_deref(),
                    definition.description.as_deref(),
                ]
                .into_iter()
                .any(|field| contains_ignore_case(field, &query))
            })
            .collect()
    }

    /// First kamelet whose `metadata.name` equals `name`, ignoring case
    pub fn get_kamelet(&self, name: &str) -> Option<&Kamelet> {
        let name = name.to_lowercase();
        self.kamelets
            .iter()
            .find(|k| k.name().is_some_and(|n| n.to_lowercase() == name))
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn kamelets(&self) -> &[Kamelet] {
        &self.kamelets
    }

    pub fn spi_beans(&self) -> &[SpiBean] {
        &self.spi_beans
    }

    pub fn components_count(&self) -> usize {
        self.components.len()
    }

    pub fn kamelets_count(&self) -> usize {
        self.kamelets.len()
    }

    pub fn spi_beans_count(&self) -> usize {
        self.spi_beans.len()
    }

    pub fn counts(&self) -> MetadataCounts {
        MetadataCounts {
            components: self.components.len(),
            kamelets: self.kamelets.len(),
            spi_beans: self.spi_beans.len(),
        }
    }
}

/// Parse a multi-document kamelet catalog.
///
/// Invalid YAML is an error. Documents that parse but are empty or do not
/// have the shape of a kamelet are skipped.
pub fn parse_kamelets(text: &str) -> Result<Vec<Kamelet>> {
    let mut kamelets = Vec::new();

    for document in serde_yaml::Deserializer::from_str(text) {
        let value = serde_yaml::Value::deserialize(document)?;
        if !value.is_mapping() {
            if !value.is_null() {
                debug!("Skipping kamelet document that is not a mapping");
            }
            continue;
        }

        match serde_yaml::from_value::<Kamelet>(value) {
            Ok(kamelet) => kamelets.push(kamelet),
            Err(e) => debug!("Skipping malformed kamelet document: {}", e),
        }
    }

    Ok(kamelets)
}

fn contains_ignore_case(field: Option<&str>, query_lower: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(query_lower))
}

async fn write_cache(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).await?;
    debug!("Saved metadata cache: {}", path.display());
    Ok(())
}

fn cache_error(path: &Path, err: impl std::fmt::Display) -> WeikioError {
    WeikioError::CacheParse {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
