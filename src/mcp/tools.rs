//! MCP tool implementations
//!
//! Eight tools in three groups:
//! - Weik.io CLI: list_agents, apply_config
//! - Integration advice: get_supported_integration_types, get_docker_compose
//! - Camel metadata: search_components, get_component_details,
//!   search_kamelets, get_kamelet_details
//!
//! Every tool returns plain text; the server wraps it as MCP content.

use crate::compose::DOCKER_COMPOSE;
use crate::error::{Result, WeikioError};
use crate::integration_types::integration_types;
use crate::metadata::{
    component_summary, format_component_details, format_kamelet_details, kamelet_summary,
    MetadataCounts, MetadataStore,
};
use crate::weikio::WeikioCli;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Tool schema definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub name: String,

    pub description: String,

    /// JSON Schema for the arguments object
    pub input_schema: Value,
}

impl Tool {
    fn new(name: &str, description: &str, input_schema: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

fn no_arguments() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {},
        "required": []
    })
}

fn one_string_argument(name: &str, description: &str) -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            name: {
                "type": "string",
                "description": description
            }
        },
        "required": [name]
    })
}

#[derive(Deserialize)]
struct QueryParams {
    query: Option<String>,
}

#[derive(Deserialize)]
struct NameParams {
    name: Option<String>,
}

#[derive(Deserialize)]
struct ApplyConfigParams {
    filepath: Option<String>,
}

/// Tool handler that dispatches to the CLI wrapper or the metadata store
pub struct ToolHandler {
    store: Mutex<MetadataStore>,
    cli: WeikioCli,
}

impl ToolHandler {
    pub fn new(store: MetadataStore, cli: WeikioCli) -> Self {
        Self {
            store: Mutex::new(store),
            cli,
        }
    }

    /// Load the metadata catalogs if they are not loaded yet
    pub async fn initialize_metadata(&self) -> Result<MetadataCounts> {
        let mut store = self.store.lock().await;
        store.initialize().await?;
        Ok(store.counts())
    }

    /// Get list of all available tools
    pub fn list_tools(&self) -> Vec<Tool> {
        vec![
            // Weik.io CLI tools
            Tool::new("list_agents", "List all Weik.io agents", no_arguments()),
            Tool::new(
                "apply_config",
                "Apply a Weik.io configuration file",
                one_string_argument("filepath", "Path to the YAML configuration file"),
            ),
            // Integration advisor tools
            Tool::new(
                "get_supported_integration_types",
                "Get information about supported integration types in Weik.io",
                no_arguments(),
            ),
            // Apache Camel metadata tools
            Tool::new(
                "search_components",
                "Search for Apache Camel components by name, description, or label",
                one_string_argument("query", "Search query"),
            ),
            Tool::new(
                "get_component_details",
                "Get detailed information about a specific Apache Camel component",
                one_string_argument("name", "Component name"),
            ),
            Tool::new(
                "search_kamelets",
                "Search for Apache Camel Kamelets by name, title, or description",
                one_string_argument("query", "Search query"),
            ),
            Tool::new(
                "get_kamelet_details",
                "Get detailed information about a specific Apache Camel Kamelet",
                one_string_argument("name", "Kamelet name"),
            ),
            Tool::new(
                "get_docker_compose",
                "Get a Docker Compose file for setting up a local Weik.io instance",
                no_arguments(),
            ),
        ]
    }

    /// Execute a tool call
    pub async fn execute(&self, tool_name: &str, params: Value) -> Result<String> {
        debug!("Executing tool: {}", tool_name);

        match tool_name {
            "list_agents" => self.cli.list_agents().await,
            "apply_config" => self.apply_config(params).await,
            "get_supported_integration_types" => {
                Ok(serde_json::to_string_pretty(integration_types())?)
            }
            "search_components" => self.search_components(params).await,
            "get_component_details" => self.get_component_details(params).await,
            "search_kamelets" => self.search_kamelets(params).await,
            "get_kamelet_details" => self.get_kamelet_details(params).await,
            "get_docker_compose" => Ok(DOCKER_COMPOSE.to_string()),
            _ => {
                warn!("Unknown tool: {}", tool_name);
                Err(WeikioError::UnknownTool(tool_name.to_string()))
            }
        }
    }

    async fn apply_config(&self, params: Value) -> Result<String> {
        let params: ApplyConfigParams = parse_params(params)?;
        let filepath = required(params.filepath, "Configuration file path is required")?;
        self.cli.apply_config(&filepath).await
    }

    async fn search_components(&self, params: Value) -> Result<String> {
        let params: QueryParams = parse_params(params)?;
        let query = required(params.query, "Search query is required")?;

        let mut store = self.store.lock().await;
        store.initialize().await?;

        let components = store.search_components(&query);
        debug!(
            "Search results for {:?}: {} of {} components",
            query,
            components.len(),
            store.components_count()
        );

        if components.is_empty() {
            return Ok(format!("No components found matching \"{}\"", query));
        }

        let lines: Vec<String> = components.into_iter().map(component_summary).collect();
        Ok(format!(
            "Found {} components matching \"{}\":\n\n{}",
            lines.len(),
            query,
            lines.join("\n")
        ))
    }

    async fn get_component_details(&self, params: Value) -> Result<String> {
        let params: NameParams = parse_params(params)?;
        let name = required(params.name, "Component name is required")?;

        let mut store = self.store.lock().await;
        store.initialize().await?;

        Ok(match store.get_component(&name) {
            Some(component) => format_component_details(component),
            None => format!("Component \"{}\" not found", name),
        })
    }

    async fn search_kamelets(&self, params: Value) -> Result<String> {
        let params: QueryParams = parse_params(params)?;
        let query = required(params.query, "Search query is required")?;

        let mut store = self.store.lock().await;
        store.initialize().await?;

        let kamelets = store.search_kamelets(&query);
        debug!(
            "Search results for {:?}: {} of {} kamelets",
            query,
            kamelets.len(),
            store.kamelets_count()
        );

        if kamelets.is_empty() {
            return Ok(format!("No kamelets found matching \"{}\"", query));
        }

        let lines: Vec<String> = kamelets.into_iter().map(kamelet_summary).collect();
        Ok(format!(
            "Found {} kamelets matching \"{}\":\n\n{}",
            lines.len(),
            query,
            lines.join("\n")
        ))
    }

    async fn get_kamelet_details(&self, params: Value) -> Result<String> {
        let params: NameParams = parse_params(params)?;
        let name = required(params.name, "Kamelet name is required")?;

        let mut store = self.store.lock().await;
        store.initialize().await?;

        Ok(match store.get_kamelet(&name) {
            Some(kamelet) => format_kamelet_details(kamelet),
            None => format!("Kamelet \"{}\" not found", name),
        })
    }
}

fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T> {
    let params = if params.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        params
    };
    serde_json::from_value(params)
        .map_err(|e| WeikioError::InvalidParams(format!("Invalid arguments: {}", e)))
}

/// Reject a missing or blank string argument; the value is passed on as given
fn required(value: Option<String>, message: &str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| WeikioError::InvalidParams(message.to_string()))
}
