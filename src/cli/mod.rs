//! Command-line interface for the tracer server

pub mod server;

pub use server::*;
