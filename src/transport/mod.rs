//! Transport layer for the MCP server.
//!
//! The gateway serves stdio only: JSON-RPC over stdin/stdout, the standard
//! mode for CLI-based MCP integrations. Stdout is reserved for protocol
//! traffic; all diagnostics go to stderr.

pub mod stdio;

pub use stdio::StdioTransport;

use crate::error::GatewayResult;
use std::future::Future;

/// Trait for MCP transport implementations.
pub trait Transport: Send + Sync {
    /// Start the transport and block until it shuts down.
    fn run(&self) -> impl Future<Output = GatewayResult<()>> + Send;

    /// Get the name of this transport for logging.
    fn name(&self) -> &'static str;
}
