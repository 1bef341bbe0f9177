use serde_json::Value;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::mcp_server::JsonRpcHandler;

/// Stdio transport for MCP server
pub struct StdioTransport {
    handler: JsonRpcHandler,
}

impl StdioTransport {
    pub fn new(handler: JsonRpcHandler) -> Self {
        Self { handler }
    }

    /// Run the stdio transport, reading from stdin and writing to stdout
    pub async fn run(&self) -> io::Result<()> {
        info!("Starting stdio transport");
        serve(
            &self.handler,
            BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
        )
        .await
    }
}

/// Reads newline-delimited JSON-RPC from `reader` and writes one response line per
/// request to `writer`. Each request runs on its own task; responses are written as
/// they complete, so a slow transcript fetch does not hold up a quick search.
pub async fn serve<R, W>(handler: &JsonRpcHandler, reader: R, mut writer: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Value>();

    let read_loop = {
        let handler = handler.clone();
        async move {
            let mut lines = reader.lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        debug!("Processing line: {}", line);
                        match serde_json::from_str::<Value>(&line) {
                            Ok(request) => {
                                let handler = handler.clone();
                                let tx = tx.clone();
                                tokio::spawn(async move {
                                    if let Some(response) = handler.handle_request(request).await {
                                        // Receiver only goes away once the writer has failed.
                                        let _ = tx.send(response);
                                    }
                                });
                            }
                            Err(e) => {
                                error!("Failed to parse JSON-RPC request: {}", e);
                                let _ = tx.send(serde_json::json!({
                                    "jsonrpc": "2.0",
                                    "error": {
                                        "code": -32700,
                                        "message": "Parse error",
                                        "data": e.to_string()
                                    },
                                    "id": null
                                }));
                            }
                        }
                    }
                    Ok(None) => {
                        debug!("EOF reached on input");
                        break;
                    }
                    Err(e) => {
                        error!("Error reading input: {}", e);
                        break;
                    }
                }
            }
            // `tx` drops here; the writer drains in-flight responses and stops.
        }
    };

    let write_loop = async {
        while let Some(response) = rx.recv().await {
            let line = serde_json::to_string(&response)?;
            writer.write_all(line.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
            debug!("Sent response: {}", line);
        }
        Ok::<(), io::Error>(())
    };

    let ((), written) = tokio::join!(read_loop, write_loop);
    written
}
