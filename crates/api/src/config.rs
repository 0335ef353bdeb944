//! # API Configuration Module
//!
//! This module loads the planner server configuration from environment
//! variables, with defaults for everything except the PostgreSQL URL when
//! that backend is selected.
//!
//! ## Environment Variables
//!
//! - `PLANNER_HOST`: Host address to bind to (default: "0.0.0.0")
//! - `PLANNER_PORT`: Port to listen on (default: 3000)
//! - `PLANNER_STORAGE`: `file`, `memory` or `postgres` (default: "file")
//! - `PLANNER_DATA_FILE`: JSON file used by `file` storage (default: "planner-data.json")
//! - `DATABASE_URL`: PostgreSQL connection string (required for `postgres` storage)
//! - `PLANNER_LAYOUT`: `weekly` or `flat` (default: "weekly")
//! - `PLANNER_FIRST_HOUR` / `PLANNER_END_HOUR`: displayed rows, end exclusive (default: 8 / 20)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `PLANNER_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `PLANNER_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `PLANNER_SHUTDOWN_SAVE_TIMEOUT_SECONDS`: Time allowed for the exit save (default: 2)

use eyre::{eyre, Result, WrapErr};
use planner_core::models::GridConfig;
use std::{env, path::PathBuf};
use tracing::Level;

/// Where the planner's JSON documents are kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    File(PathBuf),
    Memory,
    Postgres(String),
}

/// How schedules are keyed in storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleLayout {
    /// One schedule per week (`plannerSemanas`)
    Weekly,
    /// One schedule for every week (`plannerDados`)
    Flat,
}

/// Configuration for the planner server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use planner_api::config::PlannerConfig;
///
/// fn example() -> Result<()> {
///     let config = PlannerConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Host address for the server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the server to listen on
    pub port: u16,

    pub storage: StorageBackend,

    pub layout: ScheduleLayout,

    /// Displayed hour rows
    pub grid: GridConfig,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Seconds allowed for the best-effort save on shutdown
    pub shutdown_save_timeout: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            storage: StorageBackend::File(PathBuf::from("planner-data.json")),
            layout: ScheduleLayout::Weekly,
            grid: GridConfig::default(),
            log_level: Level::INFO,
            cors_origins: None,
            request_timeout: 30,
            shutdown_save_timeout: 2,
        }
    }
}

impl PlannerConfig {
    /// Creates a new PlannerConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `PLANNER_PORT` or an hour bound cannot be parsed
    /// - the hour bounds do not form a valid grid
    /// - `PLANNER_STORAGE` or `PLANNER_LAYOUT` hold an unknown value
    /// - `postgres` storage is selected without `DATABASE_URL`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable lookup; `from_env` uses
    /// the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        // Network settings
        let host = var("PLANNER_HOST").unwrap_or(defaults.host);
        let port = match var("PLANNER_PORT") {
            Some(port) => port.parse().wrap_err("Invalid PLANNER_PORT value")?,
            None => defaults.port,
        };

        // Storage settings
        let storage = match var("PLANNER_STORAGE").as_deref().unwrap_or("file") {
            "file" => StorageBackend::File(
                var("PLANNER_DATA_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("planner-data.json")),
            ),
            "memory" => StorageBackend::Memory,
            "postgres" => StorageBackend::Postgres(
                var("DATABASE_URL")
                    .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set for postgres storage"))?,
            ),
            other => return Err(eyre!("Unknown PLANNER_STORAGE value: {}", other)),
        };

        let layout = match var("PLANNER_LAYOUT").as_deref().unwrap_or("weekly") {
            "weekly" => ScheduleLayout::Weekly,
            "flat" => ScheduleLayout::Flat,
            other => return Err(eyre!("Unknown PLANNER_LAYOUT value: {}", other)),
        };

        // Grid settings
        let first_hour = match var("PLANNER_FIRST_HOUR") {
            Some(hour) => hour.parse().wrap_err("Invalid PLANNER_FIRST_HOUR value")?,
            None => defaults.grid.first_hour(),
        };
        let end_hour = match var("PLANNER_END_HOUR") {
            Some(hour) => hour.parse().wrap_err("Invalid PLANNER_END_HOUR value")?,
            None => defaults.grid.end_hour(),
        };
        let grid = GridConfig::new(first_hour, end_hour)?;

        // Logging settings
        let log_level = match var("LOG_LEVEL").as_deref().unwrap_or("info") {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = var("PLANNER_CORS_ORIGINS")
            .map(|origins| origins.split(',').map(|s| s.trim().to_string()).collect());

        // Performance settings
        let request_timeout = var("PLANNER_REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.request_timeout);
        let shutdown_save_timeout = var("PLANNER_SHUTDOWN_SAVE_TIMEOUT_SECONDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.shutdown_save_timeout);

        Ok(Self {
            host,
            port,
            storage,
            layout,
            grid,
            log_level,
            cors_origins,
            request_timeout,
            shutdown_save_timeout,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
