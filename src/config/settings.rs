//! Tracer server configuration settings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Main configuration for the tracer server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    /// Server listening address
    pub listen_addr: SocketAddr,

    /// Log level configuration
    pub log_level: String,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Output layout of the console subscriber
    pub format: LogFormat,

    /// Colorize console output
    pub with_ansi: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Pretty,
    Compact,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            log_level: "info".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Compact,
            with_ansi: true,
        }
    }
}

impl TracerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: TracerConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        Ok(config)
    }

    /// Load configuration from YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();

        let mut config = if config_path.exists() {
            Self::from_yaml_file(config_path)?
        } else {
            return Err(anyhow::anyhow!(
                "Config file '{}' not found",
                config_path.display()
            ));
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Defaults with environment variable overrides applied
    pub fn from_env_vars() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Override settings from `TRACER_LISTEN_ADDR`, `TRACER_PORT` and `RUST_LOG`
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr_str) = lookup("TRACER_LISTEN_ADDR") {
            if let Ok(addr) = addr_str.parse() {
                self.listen_addr = addr;
            }
        }

        // A bare port binds loopback and wins over TRACER_LISTEN_ADDR
        if let Some(port) = lookup("TRACER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.listen_addr = SocketAddr::from(([127, 0, 0, 1], port));
            }
        }

        if let Some(log_level) = lookup("RUST_LOG") {
            self.log_level = log_level;
        }
    }
}
