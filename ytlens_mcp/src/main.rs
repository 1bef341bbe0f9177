use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ytlens_core::{
    mcp_server::{JsonRpcHandler, McpServer},
    transport::StdioTransport,
    Config,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries JSON-RPC; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ytlens_mcp=info,ytlens_core=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("Starting ytlens MCP server");

    let config_path = std::env::var_os("YTLENS_CONFIG").map(PathBuf::from);
    let config = Config::load(config_path.as_deref()).map_err(|e| {
        error!("Failed to load config: {}", e);
        e
    })?;

    let registry = ytlens_core::build_registry(&config)?;
    let server = McpServer::new(Arc::new(registry));
    let handler = JsonRpcHandler::new(server);
    let transport = StdioTransport::new(handler);

    info!("MCP server ready, listening on stdio");

    tokio::select! {
        result = transport.run() => {
            if let Err(e) = result {
                error!("Transport error: {}", e);
                return Err(e.into());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
        }
    }

    Ok(())
}
