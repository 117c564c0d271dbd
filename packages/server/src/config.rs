// ABOUTME: Server configuration loaded from the environment
// ABOUTME: Port, CORS origin, and database URL; AI settings come from speccraft_ai::AiConfig

use std::env;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
}

#[derive(Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub cors_origin: String,
    pub database_url: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_str = env::var("PORT").unwrap_or_else(|_| "8000".to_string());
        let port = port_str.parse::<u16>()?;
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string());

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://speccraft.db?mode=rwc".to_string());

        Ok(Self {
            port,
            cors_origin,
            database_url,
        })
    }
}
