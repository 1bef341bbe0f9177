use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

use crate::{ConnectorError, ProviderRegistry};
use rmcp::model::*;

/// MCP server implementation that wraps the ProviderRegistry
pub struct McpServer {
    registry: Arc<ProviderRegistry>,
}

impl McpServer {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// Get aggregated capabilities from all connectors
    pub async fn get_capabilities(&self) -> ServerCapabilities {
        let mut capabilities = ServerCapabilities::default();
        for (_name, connector) in self.registry.providers() {
            let conn_caps = connector.capabilities().await;
            if conn_caps.tools.is_some() {
                capabilities.tools = conn_caps.tools;
            }
        }
        capabilities
    }

    pub async fn handle_initialize(
        &self,
        request: InitializeRequestParam,
    ) -> Result<InitializeResult, ConnectorError> {
        info!(client = %request.client_info.name, "MCP server initializing");

        Ok(InitializeResult {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: self.get_capabilities().await,
            server_info: Implementation {
                name: "ytlens".to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "YouTube search, video details and transcripts. Video tools accept an 11-character video ID or any youtube.com / youtu.be URL."
                    .to_string(),
            ),
        })
    }

    /// Tools from every connector, under their own names.
    pub async fn handle_list_tools(&self) -> Result<ListToolsResult, ConnectorError> {
        let mut all_tools = Vec::new();
        for (name, connector) in self.registry.providers() {
            let listed = connector.list_tools().await.map_err(|e| {
                ConnectorError::Other(format!("listing tools of {} failed: {}", name, e))
            })?;
            all_tools.extend(listed.tools);
        }

        Ok(ListToolsResult {
            tools: all_tools,
            next_cursor: None,
        })
    }

    /// Routes to the connector that owns the tool. `connector/tool` names are also accepted.
    pub async fn handle_call_tool(
        &self,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, ConnectorError> {
        if let Some((connector_name, tool_name)) = request.name.split_once('/') {
            let connector = self.registry.get_provider(connector_name).ok_or_else(|| {
                ConnectorError::InvalidParams(format!("Unknown connector: {}", connector_name))
            })?;
            let unprefixed_request = CallToolRequestParam {
                name: tool_name.to_string().into(),
                arguments: request.arguments.clone(),
            };
            return connector.call_tool(unprefixed_request).await;
        }

        let connector = self
            .registry
            .find_tool_owner(&request.name)
            .await
            .ok_or(ConnectorError::ToolNotFound)?;
        connector.call_tool(request).await
    }
}

/// JSON-RPC message handler for the MCP server
#[derive(Clone)]
pub struct JsonRpcHandler {
    server: Arc<McpServer>,
}

impl JsonRpcHandler {
    pub fn new(server: McpServer) -> Self {
        Self {
            server: Arc::new(server),
        }
    }

    /// Process a JSON-RPC message. Notifications (no `id`) produce no response.
    pub async fn handle_request(&self, request: Value) -> Option<Value> {
        debug!("Handling JSON-RPC request: {:?}", request);

        let method = request.get("method").and_then(|m| m.as_str()).unwrap_or("");
        let Some(id) = request.get("id").cloned() else {
            debug!(method, "notification received");
            return None;
        };
        let params = request.get("params").cloned().unwrap_or(json!({}));

        let result = match method {
            "initialize" => match serde_json::from_value::<InitializeRequestParam>(params) {
                Ok(req) => to_response(self.server.handle_initialize(req).await),
                Err(e) => Err(ConnectorError::SerdeJson(e).to_jsonrpc_error()),
            },
            "ping" => Ok(json!({})),
            "tools/list" => to_response(self.server.handle_list_tools().await),
            "tools/call" => match serde_json::from_value::<CallToolRequestParam>(params) {
                Ok(req) => to_response(self.server.handle_call_tool(req).await),
                Err(e) => Err(ConnectorError::SerdeJson(e).to_jsonrpc_error()),
            },
            "resources/list" => Ok(json!({"resources": []})),
            "prompts/list" => Ok(json!({"prompts": []})),
            _ => Err(ConnectorError::MethodNotFound.to_jsonrpc_error()),
        };

        Some(match result {
            Ok(result) => json!({
                "jsonrpc": "2.0",
                "result": result,
                "id": id,
            }),
            Err(error) => json!({
                "jsonrpc": "2.0",
                "error": error,
                "id": id,
            }),
        })
    }
}

fn to_response<T: serde::Serialize>(result: Result<T, ConnectorError>) -> Result<Value, Value> {
    result
        .and_then(|r| serde_json::to_value(r).map_err(ConnectorError::SerdeJson))
        .map_err(|e| e.to_jsonrpc_error())
}
