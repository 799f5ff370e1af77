//! Tracer server configuration

pub mod settings;

pub use settings::{LogFormat, LoggingConfig, TracerConfig};
