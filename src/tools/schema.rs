//! Schema introspection tools.
//!
//! This module implements the `get_schema` and `describe_table` MCP tools.
//! Both render catalog metadata as plain text; `get_schema` groups the
//! column listing by table in the order the catalog returned it.

use crate::db::SqlConnector;
use crate::models::QueryResult;
use crate::models::query::Row;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::info;

/// Input for the describe_table tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DescribeTableInput {
    /// Name of the table to describe
    pub table_name: String,
}

/// Handler for schema introspection.
pub struct SchemaToolHandler {
    connector: Arc<SqlConnector>,
}

impl SchemaToolHandler {
    pub fn new(connector: Arc<SqlConnector>) -> Self {
        Self { connector }
    }

    /// Handle the get_schema tool call.
    pub async fn get_schema(&self) -> String {
        let result = self.connector.fetch_schema().await;
        if !result.success {
            return format!(
                "Error retrieving schema: {}",
                result.error.as_deref().unwrap_or("unknown failure")
            );
        }

        info!(row_count = result.row_count, "get_schema handled");
        format_schema(&result)
    }

    /// Handle the describe_table tool call.
    ///
    /// The caller-supplied name is checked against a conservative
    /// identifier pattern before it is interpolated into the catalog
    /// queries. When the column query returns nothing, the row-count query
    /// is never issued.
    pub async fn describe_table(&self, input: DescribeTableInput) -> String {
        let table_name = input.table_name.trim();
        if !is_safe_identifier(table_name) {
            return format!(
                "Invalid table name '{}'. Names must start with a letter or underscore \
                 and contain only letters, digits, and underscores.",
                table_name
            );
        }

        let columns_query = format!(
            "SELECT
    COLUMN_NAME,
    DATA_TYPE,
    IS_NULLABLE,
    COLUMN_DEFAULT,
    CHARACTER_MAXIMUM_LENGTH
FROM INFORMATION_SCHEMA.COLUMNS
WHERE TABLE_NAME = '{}' AND TABLE_CATALOG = DB_NAME()
ORDER BY ORDINAL_POSITION",
            table_name
        );

        let columns = self
            .connector
            .execute(&columns_query, self.connector.default_row_limit())
            .await;

        if !columns.success {
            return format!(
                "Error: {}",
                columns.error.as_deref().unwrap_or("unknown failure")
            );
        }
        if columns.is_empty() {
            return format!("Table '{}' not found", table_name);
        }

        let count_query = format!("SELECT COUNT(*) AS total_rows FROM [{}]", table_name);
        let count = self.connector.execute(&count_query, 1).await;
        let total_rows = count
            .rows
            .as_ref()
            .and_then(|rows| rows.first())
            .and_then(|row| row.get("total_rows"))
            .and_then(JsonValue::as_i64)
            .unwrap_or(0);

        info!(table = table_name, total_rows, "describe_table handled");
        format_table_report(table_name, total_rows, &columns)
    }
}

/// Conservative identifier allow-list applied before interpolation.
pub fn is_safe_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Render the full-schema listing grouped by table.
///
/// A table header is emitted each time the table name changes relative to
/// the previous row; the catalog's own ordering is preserved, never
/// re-sorted.
pub fn format_schema(result: &QueryResult) -> String {
    let mut text = String::from("Database schema\n");
    let empty = Vec::new();
    let rows = result.rows.as_ref().unwrap_or(&empty);

    let mut current_table: Option<&str> = None;
    for row in rows {
        let table = field_str(row, "TABLE_NAME").unwrap_or("(unknown)");
        if current_table != Some(table) {
            current_table = Some(table);
            text.push_str(&format!("\nTable: {}\n", table));
        }

        let column = field_str(row, "COLUMN_NAME").unwrap_or("(unknown)");
        let data_type = field_str(row, "DATA_TYPE").unwrap_or("unknown");
        text.push_str(&format!(
            "  - {} ({}) {}{}\n",
            column,
            data_type,
            nullability(row),
            default_clause(row)
        ));
    }

    text
}

/// Render the single-table report: name, row count, column listing.
pub fn format_table_report(table_name: &str, total_rows: i64, columns: &QueryResult) -> String {
    let mut text = format!("Table: {}\nTotal rows: {}\n\nColumns:\n", table_name, total_rows);
    let empty = Vec::new();
    let rows = columns.rows.as_ref().unwrap_or(&empty);

    for row in rows {
        let column = field_str(row, "COLUMN_NAME").unwrap_or("(unknown)");
        let data_type = field_str(row, "DATA_TYPE").unwrap_or("unknown");
        let length = row
            .get("CHARACTER_MAXIMUM_LENGTH")
            .and_then(JsonValue::as_i64)
            .map(|n| format!("({})", n))
            .unwrap_or_default();
        text.push_str(&format!(
            "  - {}: {}{} {}{}\n",
            column,
            data_type,
            length,
            nullability(row),
            default_clause(row)
        ));
    }

    text
}

fn field_str<'a>(row: &'a Row, key: &str) -> Option<&'a str> {
    row.get(key).and_then(JsonValue::as_str)
}

fn nullability(row: &Row) -> &'static str {
    if field_str(row, "IS_NULLABLE") == Some("YES") {
        "NULL"
    } else {
        "NOT NULL"
    }
}

fn default_clause(row: &Row) -> String {
    match row.get("COLUMN_DEFAULT") {
        Some(JsonValue::String(s)) => format!(" DEFAULT {}", s),
        Some(JsonValue::Number(n)) => format!(" DEFAULT {}", n),
        _ => String::new(),
    }
}
