//! Error types for the SQL Agent MCP Server.
//!
//! This module defines all error types using `thiserror` for ergonomic error
//! handling. Errors stay internal to the gateway: tool responses carry
//! descriptive text instead, and the connector funnels every fault into a
//! failed [`QueryResult`](crate::models::QueryResult).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("connection failed: {message}")]
    Connection { message: String },

    #[error("{message}")]
    Execution { message: String },

    #[error("glossary unavailable: {message}")]
    Glossary { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl GatewayError {
    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create an execution error.
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
        }
    }

    /// Create a glossary error.
    pub fn glossary(message: impl Into<String>) -> Self {
        Self::Glossary {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error came from failing to reach the server at all.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

/// Convert tiberius errors to GatewayError.
///
/// Transport-level faults become `Connection`; everything the server itself
/// reports (syntax, permissions, missing objects) becomes `Execution`.
/// Tiberius messages never include credentials, so they are safe to surface.
impl From<tiberius::error::Error> for GatewayError {
    fn from(err: tiberius::error::Error) -> Self {
        use tiberius::error::Error;
        match err {
            Error::Io { message, .. } => GatewayError::connection(message),
            Error::Routing { host, port } => {
                GatewayError::connection(format!("server redirected to {}:{}", host, port))
            }
            Error::Tls(message) => GatewayError::connection(format!("TLS error: {}", message)),
            Error::Server(token) => GatewayError::execution(token.message().to_string()),
            Error::Protocol(message) => {
                GatewayError::connection(format!("protocol error: {}", message))
            }
            other => GatewayError::execution(other.to_string()),
        }
    }
}

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        GatewayError::connection(err.to_string())
    }
}

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
