//! MCP service implementation using rmcp.
//!
//! This module defines the GatewayService struct exposing the gateway's
//! four tools via the MCP protocol using the rmcp framework's macros.
//! Every tool returns a single text block; failures become explanatory
//! text inside the response, never a protocol-level error.

use crate::db::SqlConnector;
use crate::glossary::{ContextAnnotator, GlossaryStore};
use crate::tools::query::{QueryToolHandler, RunQueryInput};
use crate::tools::schema::{DescribeTableInput, SchemaToolHandler};
use rmcp::{
    ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct GatewayService {
    /// Shared connector; opens one fresh connection per call
    connector: Arc<SqlConnector>,
    /// Shared read-only glossary, loaded once at startup
    glossary: Arc<GlossaryStore>,
    /// Tool router for MCP tool dispatch (auto-generated)
    tool_router: ToolRouter<Self>,
}

impl GatewayService {
    /// Create a new GatewayService instance.
    ///
    /// Both collaborators are constructed once in `main` and injected
    /// here; the service holds no other state.
    pub fn new(connector: Arc<SqlConnector>, glossary: Arc<GlossaryStore>) -> Self {
        Self {
            connector,
            glossary,
            tool_router: Self::tool_router(),
        }
    }

    fn query_handler(&self) -> QueryToolHandler {
        QueryToolHandler::new(
            self.connector.clone(),
            ContextAnnotator::new(self.glossary.clone()),
        )
    }

    fn schema_handler(&self) -> SchemaToolHandler {
        SchemaToolHandler::new(self.connector.clone())
    }
}

#[tool_router]
impl GatewayService {
    #[tool(
        description = "Execute a SQL SELECT query safely.\nOnly read queries are permitted; mutating statements are rejected.\nResults are capped (default 100 rows) and annotated with relevant business context from the domain glossary."
    )]
    async fn run_query(&self, Parameters(input): Parameters<RunQueryInput>) -> String {
        self.query_handler().run_query(input).await
    }

    #[tool(
        description = "Get the complete database schema.\nReturns every table with its columns, data types, nullability, and defaults."
    )]
    async fn get_schema(&self) -> String {
        self.schema_handler().get_schema().await
    }

    #[tool(description = "Test connectivity to the database.")]
    async fn test_connection(&self) -> String {
        if self.connector.test_connection().await {
            "Database connection successful".to_string()
        } else {
            "Could not connect to the database".to_string()
        }
    }

    #[tool(
        description = "Get detailed information about one table.\nReturns the total row count and the column listing, or a not-found message."
    )]
    async fn describe_table(&self, Parameters(input): Parameters<DescribeTableInput>) -> String {
        self.schema_handler().describe_table(input).await
    }
}

#[tool_handler]
impl ServerHandler for GatewayService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "sql-agent-mcp-server".to_owned(),
                title: Some("SQL Agent MCP Server".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Read-only SQL gateway for a SQL Server database.\n\
                \n\
                ## Workflow\n\
                1. Call `get_schema` (or `describe_table`) to learn the available tables\n\
                2. Call `run_query` with a SELECT statement; results are capped at 100 rows\n\
                   unless the query carries its own TOP/LIMIT clause or a `limit` argument\n\
                3. Responses may end with a 'Business context' block explaining the domain\n\
                   concepts the query touches\n\
                \n\
                ## Safety\n\
                Only SELECT statements are executed. Statements mentioning DROP, DELETE,\n\
                UPDATE, INSERT, ALTER, CREATE, or TRUNCATE are rejected before reaching\n\
                the database."
                    .to_string(),
            ),
        }
    }
}
