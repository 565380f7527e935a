//! Query result model.
//!
//! [`QueryResult`] is the universal outcome of every execution attempt:
//! either a materialized row set or a human-readable failure description,
//! never both. Results are constructed once by the database connector,
//! formatted by the tool surface, and discarded.

use serde::Serialize;
use serde_json::Value as JsonValue;

/// A row materialized as a mapping from column name to JSON value.
pub type Row = serde_json::Map<String, JsonValue>;

#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub success: bool,
    /// Present only on success. Empty means "executed, zero rows".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Row>>,
    /// Present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Length of `rows` when present, else 0.
    pub row_count: usize,
}

impl QueryResult {
    /// Create a successful result from materialized rows.
    pub fn success(rows: Vec<Row>) -> Self {
        let row_count = rows.len();
        Self {
            success: true,
            rows: Some(rows),
            error: None,
            row_count,
        }
    }

    /// Create a failed result with a human-readable description.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            rows: None,
            error: Some(error.into()),
            row_count: 0,
        }
    }

    /// Check if the result carries no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.as_ref().is_none_or(|rows| rows.is_empty())
    }

    /// Render the result as a text block for a tool response.
    ///
    /// Failures become a single error line; empty successes a fixed
    /// confirmation; row sets a pretty-printed JSON array.
    pub fn to_text(&self) -> String {
        if let Some(error) = &self.error {
            return format!("Error: {}", error);
        }

        match &self.rows {
            Some(rows) if !rows.is_empty() => serde_json::to_string_pretty(rows)
                .unwrap_or_else(|_| "[]".to_string()),
            _ => "Query executed successfully, no rows returned.".to_string(),
        }
    }
}
