//! Configuration handling for the SQL Agent MCP Server.
//!
//! This module provides configuration management via CLI arguments and
//! environment variables, and assembles the SQL Server connection
//! descriptor used for every connection attempt.

use clap::Parser;
use std::path::PathBuf;
use tiberius::{AuthMethod, EncryptionLevel};

pub const DEFAULT_SQL_PORT: u16 = 1433;
pub const DEFAULT_ROW_LIMIT: u32 = 100;
pub const DEFAULT_GLOSSARY_PATH: &str = "context/glossary.json";

/// Server configuration parsed from command line and environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "sql-agent-mcp-server", version, about)]
pub struct Config {
    /// SQL Server host name or address
    #[arg(long, env = "DB_SERVER", default_value = "localhost")]
    pub server: String,

    /// SQL Server TCP port
    #[arg(long, env = "DB_PORT", default_value_t = DEFAULT_SQL_PORT)]
    pub port: u16,

    /// Database name to connect to
    #[arg(long, env = "DB_DATABASE")]
    pub database: String,

    /// SQL authentication user name
    #[arg(long, env = "DB_USERNAME")]
    pub username: String,

    /// SQL authentication password (sensitive - never logged)
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Path to the business glossary document
    #[arg(long, env = "GLOSSARY_PATH", default_value = DEFAULT_GLOSSARY_PATH)]
    pub glossary_path: PathBuf,

    /// Row cap applied to queries that carry no limiting clause
    #[arg(long, default_value_t = DEFAULT_ROW_LIMIT)]
    pub default_row_limit: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, default_value_t = false)]
    pub json_logs: bool,
}

impl Config {
    /// Build the tiberius connection descriptor.
    ///
    /// Assembled once at startup and cloned for every connection attempt.
    /// Encryption is explicitly disabled, matching the deployment this
    /// gateway targets.
    pub fn connection_config(&self) -> tiberius::Config {
        let mut config = tiberius::Config::new();
        config.host(&self.server);
        config.port(self.port);
        config.database(&self.database);
        config.authentication(AuthMethod::sql_server(&self.username, &self.password));
        config.encryption(EncryptionLevel::NotSupported);
        config.trust_cert();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config::parse_from([
            "sql-agent-mcp-server",
            "--server",
            "db.example.internal",
            "--database",
            "Chinook",
            "--username",
            "reader",
            "--password",
            "secret",
        ])
    }

    #[test]
    fn test_defaults() {
        let config = test_config();
        assert_eq!(config.port, DEFAULT_SQL_PORT);
        assert_eq!(config.default_row_limit, DEFAULT_ROW_LIMIT);
        assert_eq!(
            config.glossary_path,
            PathBuf::from(DEFAULT_GLOSSARY_PATH)
        );
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
    }

    #[test]
    fn test_connection_config_addr() {
        let config = test_config();
        let conn = config.connection_config();
        assert_eq!(conn.get_addr(), "db.example.internal:1433");
    }

    #[test]
    fn test_port_override() {
        let config = Config::parse_from([
            "sql-agent-mcp-server",
            "--server",
            "localhost",
            "--port",
            "14330",
            "--database",
            "Chinook",
            "--username",
            "reader",
            "--password",
            "secret",
        ]);
        assert_eq!(config.connection_config().get_addr(), "localhost:14330");
    }
}
