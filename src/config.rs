use crate::core::db::SqliteOptions;
use crate::core::{DbaseError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration structure parsed from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub database: Option<DatabaseConfig>,
    pub sqlite: Option<SqliteConfig>,
    pub logging: Option<LoggingConfig>,
}

/// Connection target.
#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub uri: Option<String>,
}

/// SQLite-related configuration.
#[derive(Debug, Deserialize)]
pub struct SqliteConfig {
    pub pragmas: Option<Vec<String>>,
    pub busy_timeout_ms: Option<u64>,
}

/// Logging configuration for the command-line tool.
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DbaseError::Config(e.to_string()))
    }

    pub fn database_uri(&self) -> Option<&str> {
        self.database.as_ref()?.uri.as_deref()
    }

    /// Options for opening SQLite connections; defaults when unset.
    pub fn sqlite_options(&self) -> SqliteOptions {
        match &self.sqlite {
            Some(sqlite) => SqliteOptions {
                pragmas: sqlite.pragmas.clone().unwrap_or_default(),
                busy_timeout: sqlite.busy_timeout_ms.map(Duration::from_millis),
            },
            None => SqliteOptions::default(),
        }
    }

    /// Log level name, `info` when unset.
    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }
}

/// Loads configuration from a TOML file at the given path.
///
/// # Arguments
///
/// * `path` - The file path to the TOML configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Config::from_toml_str(&content)
}

/// `<config dir>/dbase/config.toml`, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dbase").join("config.toml"))
}
