//! HTTP Tracer - request/response logging for hyper handlers
//!
//! Wrap any [`Handler`] in a [`Tracer`] and every request logs two lines:
//! method and URL on arrival, then status, byte count and latency once the
//! handler returns. The response itself is left untouched; the tracer only
//! observes it through a [`Tee`] feeding a [`ResponseRecorder`].

pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod logging;
pub mod server;
pub mod sink;
pub mod tracer;
pub mod utils;
pub mod version;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use config::TracerConfig;
pub use error::{Error, Result};
pub use handler::{handler_fn, Handler};
pub use logging::{init_logger_with_config, log_debug, log_error, log_info};
pub use server::{DemoHandler, HttpServer};
pub use sink::{tee, Hijacked, RawConnection, ResponseRecorder, ResponseSink, ResponseWriter, Tee};
pub use tracer::{RequestLogger, StdLogger, Tracer};
