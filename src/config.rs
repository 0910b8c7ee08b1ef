//! Storage configuration, resolved outside the core.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable naming the database target.
pub const DATABASE_ENV: &str = "GRIDMATCH_DATABASE";

/// Which storage engine backs the match store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Embedded file-backed SQLite database.
    Sqlite,
    /// In-memory store; nothing survives the process.
    Memory,
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {}", message)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
}

impl ConfigError {
    /// Creates a new configuration error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Storage configuration: backend kind plus connection target.
///
/// SQLite carries no credentials; a client-server backend would add them at
/// this boundary, outside the core.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend kind.
    #[serde(default = "default_backend")]
    backend: StorageBackend,
    /// Connection target: a file path (or `":memory:"`) for SQLite.
    #[serde(default = "default_database")]
    database: String,
}

fn default_backend() -> StorageBackend {
    StorageBackend::Sqlite
}

fn default_database() -> String {
    "gridmatch.db".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            database: default_database(),
        }
    }
}

impl StorageConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading storage config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(backend = ?config.backend, database = %config.database, "Config loaded");
        Ok(config)
    }

    /// Resolves the effective configuration.
    ///
    /// Precedence: explicit path (CLI flag), then the `GRIDMATCH_DATABASE`
    /// environment variable, then the optional config file, then defaults.
    /// Explicit paths select the SQLite backend.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a provided config file is unreadable.
    #[instrument(skip(config_file))]
    pub fn resolve(
        db_path: Option<String>,
        config_file: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        if let Some(database) = db_path {
            debug!(database = %database, "Using explicit database path");
            return Ok(Self {
                backend: StorageBackend::Sqlite,
                database,
            });
        }

        if let Ok(database) = std::env::var(DATABASE_ENV) {
            debug!(database = %database, "Using database path from environment");
            return Ok(Self {
                backend: StorageBackend::Sqlite,
                database,
            });
        }

        if let Some(path) = config_file {
            return Self::from_file(path);
        }

        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = StorageConfig::default();
        assert_eq!(*config.backend(), StorageBackend::Sqlite);
        assert_eq!(config.database(), "gridmatch.db");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "backend = \"memory\"\ndatabase = \"ignored\"").expect("write");

        let config = StorageConfig::from_file(file.path()).expect("parse");
        assert_eq!(*config.backend(), StorageBackend::Memory);
        assert_eq!(config.database(), "ignored");
    }

    #[test]
    fn test_from_file_applies_defaults_for_missing_keys() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "database = \"elsewhere.db\"").expect("write");

        let config = StorageConfig::from_file(file.path()).expect("parse");
        assert_eq!(*config.backend(), StorageBackend::Sqlite);
        assert_eq!(config.database(), "elsewhere.db");
    }

    #[test]
    fn test_explicit_path_wins() {
        let config =
            StorageConfig::resolve(Some("explicit.db".to_string()), None).expect("resolve");
        assert_eq!(*config.backend(), StorageBackend::Sqlite);
        assert_eq!(config.database(), "explicit.db");
    }
}
