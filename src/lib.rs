//! SQL Agent MCP Server Library
//!
//! This library provides MCP (Model Context Protocol) tools that let AI
//! assistants run guarded, read-only queries against a SQL Server database,
//! with results annotated from a business glossary.

pub mod config;
pub mod db;
pub mod error;
pub mod glossary;
pub mod mcp;
pub mod models;
pub mod tools;
pub mod transport;

pub use config::Config;
pub use error::GatewayError;
pub use mcp::GatewayService;
