//! MCP tool implementations.
//!
//! This module contains the gateway's tool handlers:
//! - `query`: run a guarded read-only query with business context
//! - `schema`: full-schema listing and single-table description
//! - `sql_guard`: read-only validation of submitted query text

pub mod query;
pub mod schema;
pub mod sql_guard;

pub use query::{QueryToolHandler, RunQueryInput};
pub use schema::{DescribeTableInput, SchemaToolHandler};
