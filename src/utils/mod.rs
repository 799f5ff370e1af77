//! Utility functions for the tracer

pub mod http;
pub mod humanize;
pub mod time;

pub use http::*;
pub use humanize::*;
pub use time::*;
