//! Environment-driven configuration.

use std::env;

use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub blob_bucket: String,
    pub blob_endpoint_url: Option<String>,
    pub blob_public_base_url: String,
    pub admin_username: String,
    pub admin_password: String,
    /// Origins allowed by CORS; empty means same-origin only.
    pub cors_allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load from the process environment, reading a `.env` file first if
    /// one is present.
    pub fn from_env() -> Result<Self> {
        let env_file_loaded = dotenvy::dotenv().is_ok();
        if env_file_loaded {
            tracing::info!("loaded .env file");
        }

        Ok(Self {
            server_host: env_or("VITRINE_HOST", "0.0.0.0"),
            server_port: parse_env("VITRINE_PORT", 8080)?,
            database_url: require("DATABASE_URL")?,
            database_max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 10)?,
            blob_bucket: require("BLOB_BUCKET")?,
            blob_endpoint_url: env::var("BLOB_ENDPOINT_URL").ok(),
            blob_public_base_url: require("BLOB_PUBLIC_BASE_URL")?,
            admin_username: require("ADMIN_USERNAME")?,
            admin_password: require("ADMIN_PASSWORD")?,
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn require(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} must be set"))
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{key} is not a valid value")),
        Err(_) => Ok(default),
    }
}
