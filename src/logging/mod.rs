use crate::config::{LogFormat, LoggingConfig};
use log::{debug, error, info, LevelFilter};
use std::sync::Once;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

static INIT: Once = Once::new();

/// Initialize the global logger with a filter directive and output settings.
/// Only the first call has any effect.
pub fn init_logger_with_config(level: &str, config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_new(level).unwrap_or_else(|e| {
            eprintln!("Warning: invalid log filter '{}': {}", level, e);
            EnvFilter::new("info")
        });
        let max_level = filter.max_level_hint();

        let builder = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_level(true)
            .with_ansi(config.with_ansi);

        let installed = match config.format {
            LogFormat::Pretty => tracing::subscriber::set_global_default(
                builder
                    .pretty()
                    .with_file(true)
                    .with_line_number(true)
                    .finish(),
            ),
            LogFormat::Compact => {
                tracing::subscriber::set_global_default(builder.compact().finish())
            }
        };
        if let Err(e) = installed {
            eprintln!("Warning: Failed to install tracing subscriber: {:?}", e);
            return;
        }

        // Route `log` records (including the request lines) into tracing
        if let Err(e) = LogTracer::init() {
            eprintln!("Warning: Failed to initialize LogTracer: {:?}", e);
        }

        log::set_max_level(match max_level {
            None => LevelFilter::Trace,
            Some(hint) => match hint.into_level() {
                None => LevelFilter::Off,
                Some(tracing::Level::ERROR) => LevelFilter::Error,
                Some(tracing::Level::WARN) => LevelFilter::Warn,
                Some(tracing::Level::INFO) => LevelFilter::Info,
                Some(tracing::Level::DEBUG) => LevelFilter::Debug,
                Some(_) => LevelFilter::Trace,
            },
        });
    });
}

/// Log an error message
pub fn log_error(message: &str) {
    error!("{}", message);
}

/// Log an info message
pub fn log_info(message: &str) {
    info!("{}", message);
}

/// Log a debug message
pub fn log_debug(message: &str) {
    debug!("{}", message);
}

/// Convenience macro for logging errors
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logging::log_error(&format!($($arg)*));
    };
}

/// Convenience macro for logging info messages
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logging::log_info(&format!($($arg)*));
    };
}

/// Convenience macro for logging debug messages
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logging::log_debug(&format!($($arg)*));
    };
}
