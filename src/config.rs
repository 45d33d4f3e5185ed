//! Configuration module
//!
//! Environment-driven settings for the server and the database pool.
//! Callers load `.env` themselves before asking for a [`Config`].

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    /// Load configuration from environment variables. Only
    /// `DATABASE_URL` is mandatory, everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingEnv("DATABASE_URL"))?;

        let database_max_connections = env_or("DATABASE_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        let port = env_or("PORT", "3000")
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        Ok(Self {
            database_url,
            database_max_connections,
            host: env_or("HOST", "127.0.0.1"),
            port,
            environment: env_or("ENVIRONMENT", "development"),
        })
    }

    /// Bind address for the HTTP listener
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config(environment: &str) -> Config {
        Config {
            database_url: "postgres://localhost/fintrack".to_string(),
            database_max_connections: 10,
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: environment.to_string(),
        }
    }

    #[test]
    fn test_server_addr_joins_host_and_port() {
        assert_eq!(sample_config("development").server_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_is_production() {
        assert!(sample_config("production").is_production());
        assert!(!sample_config("development").is_production());
        assert!(!sample_config("Production").is_production());
    }
}
