//! SQL Agent MCP Server - Main entry point.
//!
//! Bootstraps the guarded read-only query gateway: configuration, logging,
//! glossary load, a one-time connectivity check, then the stdio MCP
//! transport. All diagnostics go to stderr so stdout stays reserved for
//! protocol traffic.

use clap::Parser;
use sql_agent_mcp_server::config::Config;
use sql_agent_mcp_server::db::SqlConnector;
use sql_agent_mcp_server::glossary::GlossaryStore;
use sql_agent_mcp_server::transport::{StdioTransport, Transport};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
///
/// Writes to stderr: stdout carries MCP protocol messages and must never
/// be interleaved with diagnostics.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Pick up a .env file before reading configuration
    let _ = dotenv::dotenv();

    let config = Config::parse();

    init_tracing(&config);

    // One glossary store and one connector for the process lifetime,
    // injected into everything that needs them
    let glossary = Arc::new(GlossaryStore::load(&config.glossary_path));
    let connector = Arc::new(SqlConnector::new(&config));

    // Refuse to serve at all when the database is unreachable
    if !connector.test_connection().await {
        error!("Cannot connect to the database, exiting");
        eprintln!("Error: cannot connect to the database");
        std::process::exit(1);
    }

    info!("SQL Agent MCP Server v{} started", env!("CARGO_PKG_VERSION"));
    info!("Transport: stdio");
    info!("Safe mode: SELECT only");

    let transport = StdioTransport::new(connector, glossary);
    if let Err(e) = transport.run().await {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
