//! Stdio transport for the MCP server.
//!
//! Reads JSON-RPC messages from stdin and writes responses to stdout,
//! following the MCP protocol specification. One tool call is processed at
//! a time; each runs to completion before the next is accepted.

use crate::db::SqlConnector;
use crate::error::{GatewayError, GatewayResult};
use crate::glossary::GlossaryStore;
use crate::mcp::GatewayService;
use crate::transport::Transport;
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;
use tokio::signal;
use tracing::info;

pub struct StdioTransport {
    connector: Arc<SqlConnector>,
    glossary: Arc<GlossaryStore>,
}

impl StdioTransport {
    /// Create a new stdio transport over the injected collaborators.
    pub fn new(connector: Arc<SqlConnector>, glossary: Arc<GlossaryStore>) -> Self {
        Self { connector, glossary }
    }
}

impl Transport for StdioTransport {
    async fn run(&self) -> GatewayResult<()> {
        info!("Starting MCP server with stdio transport");

        let service = GatewayService::new(self.connector.clone(), self.glossary.clone());

        let transport = stdio();
        let running_service = service.serve(transport).await.map_err(|e| {
            GatewayError::internal(format!("Failed to start stdio transport: {}", e))
        })?;

        let shutdown_requested = tokio::select! {
            result = running_service.waiting() => {
                match result {
                    Ok(_quit_reason) => {
                        info!("Stdio transport completed normally");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Stdio transport error");
                        return Err(GatewayError::internal(format!(
                            "Stdio transport error: {}",
                            e
                        )));
                    }
                }
                false
            }
            _ = wait_for_signal() => {
                info!("Shutdown signal received");
                true
            }
        };

        if shutdown_requested {
            // tokio::select! cannot interrupt blocking stdin reads, so a
            // signal-triggered shutdown must exit the process directly.
            info!("Exiting process");
            std::process::exit(0);
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "stdio"
    }
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn wait_for_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT");
        }
        _ = terminate => {
            info!("Received SIGTERM");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use clap::Parser;

    #[test]
    fn test_stdio_transport_creation() {
        let config = Config::parse_from([
            "sql-agent-mcp-server",
            "--server",
            "localhost",
            "--database",
            "Chinook",
            "--username",
            "reader",
            "--password",
            "secret",
        ]);
        let connector = Arc::new(SqlConnector::new(&config));
        let glossary = Arc::new(GlossaryStore::empty());
        let transport = StdioTransport::new(connector, glossary);
        assert_eq!(transport.name(), "stdio");
    }
}
