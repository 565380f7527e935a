//! SQL Server connector.
//!
//! The connector owns the connection descriptor and runs every execution
//! attempt: validate the text, bound the result size, open a fresh
//! connection, materialize rows eagerly, and fold any fault into a failed
//! [`QueryResult`]. Connections are opened per call and dropped when the
//! call ends; there is no pool and no shared mutable state, so the
//! connector is safe to share behind an `Arc`.

use crate::config::Config;
use crate::db::types::row_to_json;
use crate::error::{GatewayError, GatewayResult};
use crate::models::QueryResult;
use crate::models::query::Row as JsonRow;
use crate::tools::sql_guard::{self, ValidationOutcome};
use tiberius::Client;
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::{debug, error, warn};

/// Fixed introspection query for the full database schema.
///
/// Scoped to the current catalog and ordered so the tool surface can group
/// consecutive rows by table.
const SCHEMA_QUERY: &str = "\
SELECT
    TABLE_NAME,
    COLUMN_NAME,
    DATA_TYPE,
    IS_NULLABLE,
    COLUMN_DEFAULT
FROM INFORMATION_SCHEMA.COLUMNS
WHERE TABLE_CATALOG = DB_NAME()
ORDER BY TABLE_NAME, ORDINAL_POSITION";

pub struct SqlConnector {
    connection_config: tiberius::Config,
    default_row_limit: u32,
}

impl SqlConnector {
    /// Create a connector from process configuration.
    ///
    /// The connection descriptor is assembled once here and reused for
    /// every connection attempt.
    pub fn new(config: &Config) -> Self {
        Self {
            connection_config: config.connection_config(),
            default_row_limit: config.default_row_limit,
        }
    }

    /// The row cap applied when the caller does not supply one.
    pub fn default_row_limit(&self) -> u32 {
        self.default_row_limit
    }

    /// Execute query text with a row cap, returning a result in all cases.
    ///
    /// Rejected text never touches the database. Accepted text is rewritten
    /// with a `TOP` clause unless it already carries a limiting clause, then
    /// executed on a fresh connection. Every fault is folded into a failed
    /// result; this method never propagates an error.
    pub async fn execute(&self, query: &str, limit: u32) -> QueryResult {
        if let ValidationOutcome::Rejected { reason } = sql_guard::validate(query) {
            warn!(reason = %reason, "Query rejected");
            return QueryResult::failure(reason);
        }

        let sql = apply_row_cap(query, limit);
        debug!(sql = %sql, "Executing query");

        match self.fetch_rows(&sql).await {
            Ok(rows) => {
                debug!(row_count = rows.len(), "Query executed");
                QueryResult::success(rows)
            }
            Err(err) => {
                warn!(error = %err, "Query failed");
                QueryResult::failure(format!("database error: {}", err))
            }
        }
    }

    /// Fetch the column catalog for the whole database.
    pub async fn fetch_schema(&self) -> QueryResult {
        self.execute(SCHEMA_QUERY, self.default_row_limit).await
    }

    /// Check that a connection can be established at all.
    ///
    /// Failures are logged to the diagnostic channel only; the caller sees
    /// a plain boolean.
    pub async fn test_connection(&self) -> bool {
        match self.connect().await {
            Ok(client) => {
                let _ = client.close().await;
                true
            }
            Err(err) => {
                error!(error = %err, "Connection test failed");
                false
            }
        }
    }

    /// Open a fresh connection from the stored descriptor.
    async fn connect(&self) -> GatewayResult<Client<Compat<TcpStream>>> {
        let tcp = TcpStream::connect(self.connection_config.get_addr()).await?;
        tcp.set_nodelay(true)?;
        let client = Client::connect(self.connection_config.clone(), tcp.compat_write()).await?;
        Ok(client)
    }

    /// Run the (already validated and capped) text and materialize the
    /// first result set eagerly.
    async fn fetch_rows(&self, sql: &str) -> GatewayResult<Vec<JsonRow>> {
        let mut client = self.connect().await?;
        let stream = client
            .simple_query(sql)
            .await
            .map_err(GatewayError::from)?;
        let rows = stream
            .into_first_result()
            .await
            .map_err(GatewayError::from)?;
        let _ = client.close().await;
        Ok(rows.iter().map(row_to_json).collect())
    }
}

/// Insert a `TOP` clause unless the text already bounds its result size.
///
/// The check is substring containment on the uppercased text: any `TOP` or
/// `LIMIT` occurrence suppresses the rewrite. The insertion replaces
/// exactly the leading `SELECT` token of the trimmed text, so a `SELECT`
/// appearing later in a subquery or literal is never touched.
pub fn apply_row_cap(query: &str, limit: u32) -> String {
    let trimmed = query.trim();
    let normalized = trimmed.to_uppercase();

    if normalized.contains("TOP") || normalized.contains("LIMIT") {
        return trimmed.to_string();
    }

    match normalized.strip_prefix("SELECT") {
        Some(_) => format!(
            "SELECT TOP {} {}",
            limit,
            trimmed["SELECT".len()..].trim_start()
        ),
        None => trimmed.to_string(),
    }
}
