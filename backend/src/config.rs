//! Server settings, layered as: built-in defaults, then the optional
//! `config/{environment}` file, then `PM__SECTION__KEY` environment variables.

use std::net::SocketAddr;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

const ENVIRONMENT_VAR: &str = "PM_ENVIRONMENT";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// `development` also runs embedded migrations unless overridden
    pub environment: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL; has no default
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Unset means "only in development"
    pub run_migrations: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaginationConfig {
    pub partners_per_page: u32,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".into());

        config::Config::builder()
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("pagination.partners_per_page", 10)?
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            .add_source(
                Environment::with_prefix("PM")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn should_run_migrations(&self) -> bool {
        self.database
            .run_migrations
            .unwrap_or(self.environment == "development")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            partners_per_page: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(environment: &str, run_migrations: Option<bool>) -> Config {
        Config {
            environment: environment.to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://localhost/pm".to_string(),
                max_connections: 1,
                min_connections: 0,
                acquire_timeout_secs: 1,
                run_migrations,
            },
            pagination: PaginationConfig::default(),
        }
    }

    #[test]
    fn test_migrations_default_to_development_only() {
        assert!(config("development", None).should_run_migrations());
        assert!(!config("production", None).should_run_migrations());
        assert!(config("production", Some(true)).should_run_migrations());
        assert!(!config("development", Some(false)).should_run_migrations());
    }

    #[test]
    fn test_socket_addr() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        };
        assert_eq!(server.socket_addr().unwrap().port(), 8080);

        let bad = ServerConfig {
            host: "not a host".to_string(),
            port: 8080,
        };
        assert!(bad.socket_addr().is_err());
    }
}
