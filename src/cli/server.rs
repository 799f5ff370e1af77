//! Server CLI arguments

use crate::config::TracerConfig;
use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "http-tracer")]
#[command(about = "HTTP server that logs method, URL, status, size and latency of every request")]
pub struct ServerArgs {
    /// YAML configuration file
    #[arg(short, long, default_value = "config.yml")]
    pub config: PathBuf,

    /// Listening address, overrides the configuration file
    #[arg(long)]
    pub listen_addr: Option<String>,

    /// Log filter (trace, debug, info, warn, error or a tracing directive)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl ServerArgs {
    /// Layer CLI arguments over `base`
    pub fn to_config(&self, mut base: TracerConfig) -> Result<TracerConfig> {
        debug!("Converting CLI arguments to TracerConfig");

        if let Some(listen_addr) = &self.listen_addr {
            let addr: SocketAddr = listen_addr
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid listen address '{}': {}", listen_addr, e))?;
            base.listen_addr = addr;
        }

        if let Some(log_level) = &self.log_level {
            base.log_level = log_level.clone();
        }

        Ok(base)
    }

    /// Configuration file if present, otherwise defaults with environment
    /// overrides, then CLI arguments on top
    pub fn load_config(&self) -> Result<TracerConfig> {
        let base = TracerConfig::load_config(&self.config).unwrap_or_else(|e| {
            eprintln!("{}, using defaults", e);
            TracerConfig::from_env_vars()
        });
        self.to_config(base)
    }
}
