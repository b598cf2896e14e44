//! Service configuration.
//!
//! Loaded from `config/default.toml`, an optional `config/{env}.toml` overlay and
//! `HOTEL_DESK__SECTION__KEY` environment variables, in that order. Every field has a
//! default, so the service also starts with no files at all.

use serde::{Deserialize, Serialize};

use crate::domain::availability::{CapacityTable, RoomCapacity};
use crate::domain::models::DEFAULT_CATEGORY;
use crate::errors::ServerError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `127.0.0.1:3000`.
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file holding rooms, reservations and price sheets.
    #[serde(default = "default_db_path")]
    pub path: String,
    #[serde(default = "default_schema_path")]
    pub schema: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `trace`, `debug`, `info`, `warn` or `error`. `RUST_LOG` wins when set.
    #[serde(default = "default_level")]
    pub level: String,
    /// `pretty` or `json`.
    #[serde(default = "default_format")]
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Label for reservations without a `tur`.
    #[serde(default = "default_category")]
    pub default_category: String,
    /// Maximum occupants per room code.
    #[serde(default = "default_room_capacity")]
    pub room_capacity: Vec<RoomCapacity>,
}

impl EngineConfig {
    pub fn capacity_table(&self) -> CapacityTable {
        CapacityTable::new(self.room_capacity.iter().cloned())
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Result<Self, ServerError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("HOTEL_DESK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ServerError::ConfigError(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::ConfigError(format!("Failed to deserialize config: {e}")))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_workers: default_max_workers(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            schema: default_schema_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_category: default_category(),
            room_capacity: default_room_capacity(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_max_workers() -> usize {
    8
}

fn default_db_path() -> String {
    "hotel_desk.sqlite3".to_string()
}

fn default_schema_path() -> String {
    "sql/schema.sql".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_room_capacity() -> Vec<RoomCapacity> {
    [
        ("DOUBLE", 2),
        ("TERASLI", 2),
        ("TRIPLE", 3),
        ("GENİŞ", 3),
        ("F", 3),
        ("AİLE", 4),
        ("SETLİ", 4),
        ("FS", 4),
    ]
    .into_iter()
    .map(|(code, max_occupants)| RoomCapacity {
        code: code.to_string(),
        max_occupants,
    })
    .collect()
}
