//! Server configuration
//!
//! Loaded once at startup from a YAML or TOML file (format chosen by
//! extension), with CLI flag overrides. Field defaults keep a bare config
//! file valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use siteloom_core::{Error, Result};

/// Which backend holds site records and bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process maps; state lives for the process only.
    #[default]
    Memory,
    /// PostgreSQL (multi-instance deployments).
    Postgres,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// PostgreSQL connection string (required for the postgres backend).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobConfig {
    /// Filesystem root for gallery assets. When unset, blobs are held
    /// in-process (development only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<PathBuf>,

    /// Base URL under which committed assets are publicly reachable.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            root_dir: None,
            public_base_url: default_public_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Host names that are the platform's own application surface. Exact
    /// match, never inferred; include local aliases explicitly.
    #[serde(default = "default_main_hosts")]
    pub main_hosts: Vec<String>,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub blob: BlobConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            main_hosts: default_main_hosts(),
            store: StoreConfig::default(),
            blob: BlobConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a file, YAML by default, TOML for `.toml`.
    ///
    /// # Errors
    /// - `Error::Config` for unreadable or unparsable files
    pub fn load(path: &Path) -> Result<Self> {
        let path = expand_tilde(path)?;
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;

        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)
                .map_err(|e| Error::Config(format!("Invalid TOML config: {}", e)))
        } else {
            serde_yaml::from_str(&contents)
                .map_err(|e| Error::Config(format!("Invalid YAML config: {}", e)))
        }
    }

    /// Validate cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.main_hosts.is_empty() {
            return Err(Error::Config(
                "at least one main host must be configured".to_string(),
            ));
        }
        if self.store.backend == StoreBackend::Postgres && self.store.database_url.is_none() {
            return Err(Error::Config(
                "store.database_url is required for the postgres backend".to_string(),
            ));
        }
        Ok(())
    }
}

fn expand_tilde(path: &Path) -> Result<PathBuf> {
    if path.starts_with("~") {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;
        Ok(home.join(path.strip_prefix("~").unwrap_or(path)))
    } else {
        Ok(path.to_path_buf())
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_main_hosts() -> Vec<String> {
    vec!["localhost".to_string()]
}

fn default_public_base_url() -> String {
    "http://localhost:8080/assets".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
