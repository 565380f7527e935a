//! Data models for the SQL Agent MCP Server.

pub mod query;

pub use query::QueryResult;
