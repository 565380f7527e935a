//! Query execution tool.
//!
//! This module implements the `run_query` MCP tool: guarded execution of a
//! read-only statement, rendered as text with the business-context block
//! appended when the glossary recognizes anything in the query.

use crate::db::SqlConnector;
use crate::glossary::ContextAnnotator;
use crate::models::QueryResult;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Input for the run_query tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RunQueryInput {
    /// SQL SELECT statement to execute. Anything else is rejected.
    pub query: String,
    /// Maximum rows to return when the query carries no limiting clause. Default: 100
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Handler for guarded query execution.
pub struct QueryToolHandler {
    connector: Arc<SqlConnector>,
    annotator: ContextAnnotator,
}

impl QueryToolHandler {
    pub fn new(connector: Arc<SqlConnector>, annotator: ContextAnnotator) -> Self {
        Self {
            connector,
            annotator,
        }
    }

    /// Handle the run_query tool call.
    ///
    /// All failures come back as explanatory text inside the response;
    /// this method never raises to the invocation layer.
    pub async fn run_query(&self, input: RunQueryInput) -> String {
        let limit = input.limit.unwrap_or(self.connector.default_row_limit());
        let result = self.connector.execute(&input.query, limit).await;

        info!(
            success = result.success,
            row_count = result.row_count,
            "run_query handled"
        );

        let context = self.annotator.annotate(&input.query);
        compose_response(&result, &context)
    }
}

/// Combine the rendered result with the optional business-context block.
pub fn compose_response(result: &QueryResult, context: &str) -> String {
    let mut response = result.to_text();
    if !context.is_empty() {
        response.push_str("\n\nBusiness context:\n");
        response.push_str(context);
    }
    response
}
