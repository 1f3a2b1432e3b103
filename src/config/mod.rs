//! Configuration loading and management
//!
//! Settings come from three layers, later ones winning:
//! 1. built-in defaults
//! 2. an optional YAML file (path in `DIVINE_FLAVOURS_CONFIG`)
//! 3. environment variables (`DATABASE_URL`, `DATABASE_NAME`, `HOST`, `PORT`, `UPLOADS_DIR`)

use crate::core::order::CakeOrder;
use crate::core::service::DEFAULT_MAX_LIST_LIMIT;
use crate::core::store::DEFAULT_LIST_LIMIT;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Environment variable naming the YAML configuration file
pub const CONFIG_PATH_ENV: &str = "DIVINE_FLAVOURS_CONFIG";

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Order database settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection string; without it orders are kept in memory
    pub url: Option<String>,

    /// Database name
    pub name: String,

    /// Collection holding cake orders
    pub collection: String,

    /// How long an operation waits for the server before failing
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            name: "divine_flavours".to_string(),
            collection: CakeOrder::COLLECTION.to_string(),
            connect_timeout_secs: 5,
        }
    }
}

/// Reference image settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Directory images are written to
    pub dir: String,

    /// URL path the stored images are reported and served under
    pub public_prefix: String,

    /// Largest accepted order form, image included
    pub max_body_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: "uploads".to_string(),
            public_prefix: "/uploads".to_string(),
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Listing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrdersConfig {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIST_LIMIT,
            max_limit: DEFAULT_MAX_LIST_LIMIT,
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub uploads: UploadConfig,
    pub orders: OrdersConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load the full configuration: defaults, then the YAML file named by
    /// [`CONFIG_PATH_ENV`] if set, then environment overrides.
    pub fn load() -> Result<Self> {
        let vars: HashMap<String, String> = std::env::vars().collect();

        let base = match vars.get(CONFIG_PATH_ENV) {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };

        base.with_env_overrides(&vars)
    }

    /// Apply environment overrides from a variable map
    pub fn with_env_overrides(mut self, vars: &HashMap<String, String>) -> Result<Self> {
        let non_empty = |key: &str| vars.get(key).filter(|v| !v.is_empty()).cloned();

        if let Some(url) = non_empty("DATABASE_URL") {
            self.database.url = Some(url);
        }
        if let Some(name) = non_empty("DATABASE_NAME") {
            self.database.name = name;
        }
        if let Some(host) = non_empty("HOST") {
            self.server.host = host;
        }
        if let Some(port) = non_empty("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{}'", port))?;
        }
        if let Some(dir) = non_empty("UPLOADS_DIR") {
            self.uploads.dir = dir;
        }

        Ok(self)
    }

    /// Address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
