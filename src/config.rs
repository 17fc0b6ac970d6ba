//! Runtime configuration read from the environment (after `.env` is loaded).
use serde::Serialize;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::shared::errors::{AppError, AppResult};
use crate::shared::Database;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_LOCAL_STORE_PATH: &str = "listo-data.json";
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;
pub const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:19006",
    "exp://localhost:19000",
    "http://10.0.2.2:19000",
];

/// Where lists and entries are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Local,
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "local" => Ok(StorageBackend::Local),
            other => Err(AppError::InvalidInput(format!(
                "LISTO_STORAGE must be 'postgres' or 'local', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Postgres => write!(f, "postgres"),
            StorageBackend::Local => write!(f, "local"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub local_store_path: PathBuf,
    pub cors_origins: Vec<String>,
    pub max_body_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut bind_addr: SocketAddr = get("LISTO_BIND_ADDR")
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
            .map_err(|e| AppError::InvalidInput(format!("Invalid LISTO_BIND_ADDR: {}", e)))?;

        if let Some(port) = get("PORT") {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|e| AppError::InvalidInput(format!("Invalid PORT '{}': {}", port, e)))?;
            bind_addr.set_port(port);
        }

        let database_url = get("DATABASE_URL");
        let storage = match get("LISTO_STORAGE") {
            Some(value) => value.parse()?,
            None if database_url.is_some() => StorageBackend::Postgres,
            None => StorageBackend::Local,
        };

        if storage == StorageBackend::Postgres {
            let url = database_url.as_deref().ok_or_else(|| {
                AppError::InvalidInput(
                    "DATABASE_URL is required when LISTO_STORAGE=postgres".to_string(),
                )
            })?;
            Database::validate_database_url(url)?;
        }

        let local_store_path = get("LISTO_LOCAL_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOCAL_STORE_PATH));

        let cors_origins = match get("LISTO_CORS_ORIGINS") {
            Some(value) => value
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        let max_body_bytes = match get("LISTO_MAX_BODY_BYTES") {
            Some(value) => value.trim().parse::<usize>().map_err(|e| {
                AppError::InvalidInput(format!("Invalid LISTO_MAX_BODY_BYTES '{}': {}", value, e))
            })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            bind_addr,
            storage,
            database_url,
            local_store_path,
            cors_origins,
            max_body_bytes,
        })
    }
}
