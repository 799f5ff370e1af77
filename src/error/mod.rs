//! Error handling module for the tracer

use thiserror::Error;

/// Custom error type for response sinks and the server adapter
#[derive(Error, Debug)]
pub enum Error {
    /// The sink cannot hand over its underlying connection
    #[error("connection upgrade is not supported by this response sink")]
    CapabilityUnsupported,

    /// The connection was already taken over by a previous hijack
    #[error("connection has been hijacked")]
    Hijacked,

    #[error("HTTP error: {0}")]
    Http(#[from] hyper::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Result type for the tracer
pub type Result<T> = std::result::Result<T, Error>;

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Unknown(err.to_string())
    }
}
