// src/lib.rs
pub mod config;
pub mod connectors;
pub mod error;
pub mod mcp_server;
pub mod transport;
pub mod utils;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, InitializeRequestParam,
    InitializeResult, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
    ServerCapabilities, Tool,
};

use crate::connectors::youtube::YouTubeConnector;
pub use crate::config::Config;
pub use crate::error::ConnectorError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[async_trait]
pub trait Connector: Send + Sync {
    /// Returns the unique name of the connector.
    fn name(&self) -> &'static str;

    /// Returns a description of the connector.
    fn description(&self) -> &'static str;

    /// Returns the MCP capabilities of this connector.
    async fn capabilities(&self) -> ServerCapabilities;

    async fn list_tools(&self) -> Result<ListToolsResult, ConnectorError>;

    /// Runs a tool. Failures of a known tool come back as a result with `is_error`
    /// set; `Err` is reserved for protocol-level problems such as an unknown tool.
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, ConnectorError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub description: String,
}

/// Connectors keyed by name. Built once at startup and shared read-only, so
/// concurrent tool calls never wait on each other.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Arc<dyn Connector>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_provider(&mut self, provider: Arc<dyn Connector>) {
        self.providers
            .insert(provider.name().to_string(), provider);
    }

    pub fn get_provider(&self, name: &str) -> Option<&Arc<dyn Connector>> {
        self.providers.get(name)
    }

    pub fn providers(&self) -> impl Iterator<Item = (&str, &Arc<dyn Connector>)> {
        self.providers.iter().map(|(name, c)| (name.as_str(), c))
    }

    pub fn list_providers(&self) -> Vec<ServerInfo> {
        self.providers
            .iter()
            .map(|(name, connector)| ServerInfo {
                name: name.clone(),
                description: connector.description().to_string(),
            })
            .collect()
    }

    /// The connector that lists a tool called `tool`.
    pub async fn find_tool_owner(&self, tool: &str) -> Option<&Arc<dyn Connector>> {
        for connector in self.providers.values() {
            match connector.list_tools().await {
                Ok(listed) if listed.tools.iter().any(|t| t.name == tool) => {
                    return Some(connector)
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(connector = connector.name(), error = %e, "failed to list tools")
                }
            }
        }
        None
    }
}

/// Registry with every connector this crate ships, configured from `config`.
pub fn build_registry(config: &Config) -> Result<ProviderRegistry, ConnectorError> {
    let mut registry = ProviderRegistry::new();
    registry.register_provider(Arc::new(YouTubeConnector::new(&config.youtube)?));
    Ok(registry)
}
