//! Configuration management.
//!
//! repick configuration can come from:
//! - Environment variables (REPICK_*)
//! - Config file (~/.config/repick/config.toml)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// repick configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,

    /// Node registry configuration
    #[serde(default)]
    pub nodes: NodesConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default tracing filter directive (RUST_LOG takes precedence)
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "repick=info".to_string()
}

/// Node registry configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodesConfig {
    /// Node types to leave out of the registry
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl Config {
    /// Load configuration from default locations.
    pub fn load() -> Self {
        let mut config = Self::default();

        let path = Self::config_dir().join("config.toml");
        if let Ok(partial) = Self::load_partial_from_path(&path) {
            config.apply_partial(partial);
        }

        config.apply_env_overrides();
        config
    }

    /// Get the config directory.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("repick"))
            .unwrap_or_else(|| PathBuf::from(".repick"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(filter) = std::env::var("REPICK_LOG") {
            self.log.filter = filter;
        }
        if let Ok(disabled) = std::env::var("REPICK_DISABLED_NODES") {
            self.nodes.disabled = disabled
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }

    fn load_partial_from_path(path: &Path) -> std::result::Result<PartialConfig, ()> {
        let content = std::fs::read_to_string(path).map_err(|_| ())?;
        toml::from_str(&content).map_err(|_| ())
    }

    fn apply_partial(&mut self, partial: PartialConfig) {
        if let Some(log) = partial.log {
            self.log = log;
        }
        if let Some(nodes) = partial.nodes {
            self.nodes = nodes;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    log: Option<LogConfig>,
    nodes: Option<NodesConfig>,
}
