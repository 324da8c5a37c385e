//! Application configuration.
//!
//! The core depends on exactly two externally configured values: the catalog
//! database URL and the export output directory. The log directory is the
//! third, ambient one. All three live in a small JSON file with sensible
//! defaults, so a missing or partial file never blocks startup.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration, loaded from `dbdoc.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Catalog database URL, e.g. `sqlite://dbdoc.db`.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory that exported `.md` files are written into.
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for rolling log files.
    pub path: PathBuf,
}

fn default_database_url() -> String {
    "sqlite://dbdoc.db".to_owned()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            export: ExportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("docs"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("logs"),
        }
    }
}

/// Load configuration from `path`, falling back to defaults when the file is
/// missing or unreadable.
pub fn load_config(path: &Path) -> AppConfig {
    if path.exists()
        && let Ok(content) = std::fs::read_to_string(path)
        && let Ok(config) = serde_json::from_str::<AppConfig>(&content)
    {
        return config;
    }

    AppConfig::default()
}

/// Persist configuration as pretty-printed JSON, creating parent directories
/// as needed.
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
