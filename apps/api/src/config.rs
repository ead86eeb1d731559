//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. A `.env` file in the working directory is read first, when
//! present; variables already set in the environment win.

use std::env;
use std::net::SocketAddr;

use kasir_db::DbConfig;

/// API server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bind address (default: 0.0.0.0)
    pub host: String,

    /// HTTP port (default: 8080)
    pub port: u16,

    /// SQLite database path, or `:memory:` (default: kasir.db)
    pub db_conn: String,

    /// Pool size (default: 5)
    pub db_max_connections: u32,

    /// Default log filter when `RUST_LOG` is unset (default: info)
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            db_conn: "kasir.db".to_string(),
            db_max_connections: 5,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `.env` and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env is normal in production.
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();

        let config = AppConfig {
            host: lookup("HOST").unwrap_or(defaults.host),

            port: match lookup("PORT") {
                Some(value) => value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,
                None => defaults.port,
            },

            db_conn: lookup("DB_CONN")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(defaults.db_conn),

            db_max_connections: match lookup("DB_MAX_CONNECTIONS") {
                Some(value) => value
                    .trim()
                    .parse()
                    .ok()
                    .filter(|n: &u32| *n > 0)
                    .ok_or_else(|| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,
                None => defaults.db_max_connections,
            },

            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        Ok(config)
    }

    /// Socket address to bind the HTTP listener to.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("HOST".to_string()))
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        if self.db_conn == ":memory:" {
            return DbConfig::in_memory();
        }

        DbConfig::new(&self.db_conn).max_connections(self.db_max_connections)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("HOST", "127.0.0.1"),
            ("DB_CONN", "/var/lib/kasir/kasir.db"),
            ("DB_MAX_CONNECTIONS", "8"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:9000");
        assert_eq!(config.db_config().max_connections, 8);
        assert!(!config.db_config().is_in_memory());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("PORT", "eighty")])),
            Err(ConfigError::InvalidValue(name)) if name == "PORT"
        ));
        assert!(AppConfig::from_lookup(lookup(&[("DB_MAX_CONNECTIONS", "0")])).is_err());
    }

    #[test]
    fn test_memory_database() {
        let config = AppConfig::from_lookup(lookup(&[("DB_CONN", ":memory:")])).unwrap();
        assert!(config.db_config().is_in_memory());
    }
}
