//! Integration tests for MCP tool dispatch and the stdio server loop

mod common;

use common::create_test_handler;
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::io::BufReader;
use weikio_core::error::WeikioError;
use weikio_core::metadata::MetadataResource;
use weikio_core::McpServer;

#[tokio::test]
async fn test_list_tools_catalog() {
    let temp = TempDir::new().unwrap();
    let (handler, _source) = create_test_handler(temp.path());

    let names: Vec<String> = handler.list_tools().into_iter().map(|t| t.name).collect();
    assert_eq!(
        names,
        vec![
            "list_agents",
            "apply_config",
            "get_supported_integration_types",
            "search_components",
            "get_component_details",
            "search_kamelets",
            "get_kamelet_details",
            "get_docker_compose",
        ]
    );
}

#[tokio::test]
async fn test_search_components_formats_summaries() {
    let temp = TempDir::new().unwrap();
    let (handler, source) = create_test_handler(temp.path());

    let text = handler
        .execute("search_components", json!({"query": "kafka"}))
        .await
        .unwrap();

    assert_eq!(
        text,
        "Found 1 components matching \"kafka\":\n\n\
         - **kafka**: Sent and receive messages to/from an Apache Kafka broker."
    );

    // The metadata store loads lazily, once
    handler
        .execute("search_components", json!({"query": "timer"}))
        .await
        .unwrap();
    assert_eq!(source.fetches(MetadataResource::Components), 1);
}

#[tokio::test]
async fn test_search_components_no_match() {
    let temp = TempDir::new().unwrap();
    let (handler, _source) = create_test_handler(temp.path());

    let text = handler
        .execute("search_components", json!({"query": "mainframe"}))
        .await
        .unwrap();
    assert_eq!(text, "No components found matching \"mainframe\"");
}

#[tokio::test]
async fn test_search_query_is_not_trimmed() {
    let temp = TempDir::new().unwrap();
    let (handler, _source) = create_test_handler(temp.path());

    // Only "Timer." appears in the timer description, never "timer "
    let text = handler
        .execute("search_components", json!({"query": "timer "}))
        .await
        .unwrap();
    assert_eq!(text, "No components found matching \"timer \"");

    let text = handler
        .execute("search_components", json!({"query": "kafka "}))
        .await
        .unwrap();
    assert!(text.starts_with("Found 1 components matching \"kafka \":"));
}

#[tokio::test]
async fn test_search_requires_query() {
    let temp = TempDir::new().unwrap();
    let (handler, source) = create_test_handler(temp.path());

    for params in [json!({}), json!({"query": "  "}), Value::Null] {
        let result = handler.execute("search_kamelets", params).await;
        match result {
            Err(WeikioError::InvalidParams(msg)) => assert_eq!(msg, "Search query is required"),
            other => panic!("Expected InvalidParams, got: {:?}", other),
        }
    }

    // Validation happens before the store is touched
    assert_eq!(source.total_fetches(), 0);
}

#[tokio::test]
async fn test_component_details() {
    let temp = TempDir::new().unwrap();
    let (handler, _source) = create_test_handler(temp.path());

    let text = handler
        .execute("get_component_details", json!({"name": "Kafka"}))
        .await
        .unwrap();

    assert!(text.starts_with("# Kafka\n\n"));
    assert!(text.contains("- **Scheme**: kafka\n"));
    assert!(text.contains("- **Maven**: org.apache.camel:camel-kafka:4.4.0\n"));
    assert!(text.contains("## Component Properties"));
    assert!(text.contains("### Brokers (brokers)"));
    assert!(text.contains("## Additional Properties"));
    assert!(text.contains("### Topic (topic)"));
    assert!(text.contains("- **Required**: Yes"));

    let text = handler
        .execute("get_component_details", json!({"name": "old-http"}))
        .await
        .unwrap();
    assert!(text.contains("DEPRECATED"));

    let text = handler
        .execute("get_component_details", json!({"name": "nope"}))
        .await
        .unwrap();
    assert_eq!(text, "Component \"nope\" not found");
}

#[tokio::test]
async fn test_kamelet_search_and_details() {
    let temp = TempDir::new().unwrap();
    let (handler, _source) = create_test_handler(temp.path());

    let text = handler
        .execute("search_kamelets", json!({"query": "source"}))
        .await
        .unwrap();
    assert!(text.starts_with("Found 2 kamelets matching \"source\":\n\n"));
    assert!(text.contains("- **kafka-source**: Receive data from Kafka topics."));
    assert!(text.contains("- **timer-source**: Produces periodic events."));

    let text = handler
        .execute("get_kamelet_details", json!({"name": "kafka-source"}))
        .await
        .unwrap();
    assert!(text.starts_with("# Kafka Source\n\n"));
    assert!(text.contains("- **Type**: source\n"));
    assert!(text.contains("- **Group**: Kafka\n"));
    assert!(text.contains("- **Provider**: Apache Software Foundation\n"));
    assert!(text.contains("### Topic Names (topic)"));
    assert!(text.contains("- **Required**: Yes"));
    assert!(text.contains("## Dependencies\n\n- camel:kafka\n"));

    let text = handler
        .execute("get_kamelet_details", json!({"name": "ghost"}))
        .await
        .unwrap();
    assert_eq!(text, "Kamelet \"ghost\" not found");
}

#[tokio::test]
async fn test_metadata_failure_surfaces_as_tool_error() {
    let temp = TempDir::new().unwrap();
    let (handler, source) = create_test_handler(temp.path());
    source.set_failure(MetadataResource::Components, "upstream down");

    let result = handler
        .execute("get_component_details", json!({"name": "kafka"}))
        .await;
    assert!(matches!(result, Err(WeikioError::Other(ref m)) if m == "upstream down"));

    assert!(handler.initialize_metadata().await.is_err());
}

#[tokio::test]
async fn test_static_tools() {
    let temp = TempDir::new().unwrap();
    let (handler, source) = create_test_handler(temp.path());

    let text = handler
        .execute("get_supported_integration_types", json!({}))
        .await
        .unwrap();
    let types: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(types.as_array().unwrap().len(), 2);

    let compose = handler
        .execute("get_docker_compose", Value::Null)
        .await
        .unwrap();
    assert!(compose.starts_with("services:"));

    assert_eq!(source.total_fetches(), 0);
}

#[cfg(unix)]
#[tokio::test]
async fn test_cli_tools_invoke_executable() {
    let temp = TempDir::new().unwrap();
    let (handler, _source) = create_test_handler(temp.path());

    let text = handler.execute("list_agents", json!({})).await.unwrap();
    assert_eq!(text, "agents ls\n");

    let text = handler
        .execute("apply_config", json!({"filepath": "/tmp/flow.yaml"}))
        .await
        .unwrap();
    assert_eq!(text, "config apply /tmp/flow.yaml\n");

    let result = handler.execute("apply_config", json!({})).await;
    assert!(
        matches!(result, Err(WeikioError::InvalidParams(ref m)) if m == "Configuration file path is required")
    );
}

#[tokio::test]
async fn test_unknown_tool() {
    let temp = TempDir::new().unwrap();
    let (handler, _source) = create_test_handler(temp.path());

    let result = handler.execute("drop_database", json!({})).await;
    assert!(matches!(result, Err(WeikioError::UnknownTool(ref n)) if n == "drop_database"));
}

/// Feed newline-delimited requests through the server and collect responses
async fn round_trip(server: &McpServer, requests: &[Value]) -> Vec<Value> {
    let input: String = requests
        .iter()
        .map(|r| format!("{}\n", r))
        .collect();
    let mut output = Vec::new();

    server
        .serve(BufReader::new(input.as_bytes()), &mut output)
        .await
        .unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_server_round_trip() {
    let temp = TempDir::new().unwrap();
    let (handler, _source) = create_test_handler(temp.path());
    let server = McpServer::new(handler);

    let responses = round_trip(
        &server,
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {"name": "search_components", "arguments": {"query": "timer"}}
            }),
            json!({"jsonrpc": "2.0", "id": 4, "method": "ping"}),
        ],
    )
    .await;

    // The notification gets no response
    assert_eq!(responses.len(), 4);

    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "weikio-server");
    assert!(responses[0]["result"]["capabilities"]["tools"].is_object());

    assert_eq!(responses[1]["id"], 2);
    assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 8);
    assert!(responses[1]["result"]["tools"][0]["inputSchema"].is_object());

    assert_eq!(responses[2]["id"], 3);
    let content = &responses[2]["result"]["content"][0];
    assert_eq!(content["type"], "text");
    assert!(content["text"]
        .as_str()
        .unwrap()
        .starts_with("Found 1 components matching \"timer\""));

    assert_eq!(responses[3]["id"], 4);
    assert!(responses[3].get("error").is_none());
}

#[tokio::test]
async fn test_server_error_responses() {
    let temp = TempDir::new().unwrap();
    let (handler, _source) = create_test_handler(temp.path());
    let server = McpServer::new(handler);

    let responses = round_trip(
        &server,
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "resources/list"}),
            json!({
                "jsonrpc": "2.0",
                "id": 2,
                "method": "tools/call",
                "params": {"name": "search_components", "arguments": {}}
            }),
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {"name": "no_such_tool"}
            }),
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {}}),
        ],
    )
    .await;

    assert_eq!(responses.len(), 4);
    assert_eq!(responses[0]["error"]["code"], -32601);
    assert_eq!(responses[1]["error"]["code"], -32602);
    assert_eq!(responses[1]["error"]["message"], "Search query is required");
    assert_eq!(responses[2]["error"]["code"], -32601);
    assert_eq!(responses[2]["error"]["message"], "Unknown tool: no_such_tool");
    assert_eq!(responses[3]["error"]["code"], -32602);
}

#[tokio::test]
async fn test_server_rejects_malformed_json() {
    let temp = TempDir::new().unwrap();
    let (handler, _source) = create_test_handler(temp.path());
    let server = McpServer::new(handler);

    let input = "{not json\n\n";
    let mut output = Vec::new();
    server
        .serve(BufReader::new(input.as_bytes()), &mut output)
        .await
        .unwrap();

    let text = String::from_utf8(output).unwrap();
    let response: Value = serde_json::from_str(text.trim()).unwrap();
    assert_eq!(response["error"]["code"], -32700);
    assert!(response["id"].is_null());
}
