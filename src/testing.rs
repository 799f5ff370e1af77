//! Test doubles shared by the unit tests

use crate::error::{Error, Result};
use crate::sink::{Connection, Hijacked, RawConnection, ResponseSink};
use crate::tracer::RequestLogger;
use futures::FutureExt;
use hyper::{HeaderMap, StatusCode};
use std::sync::Mutex;

/// Logger that keeps every line it is given
#[derive(Default)]
pub struct CaptureLogger {
    lines: Mutex<Vec<String>>,
}

impl CaptureLogger {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl RequestLogger for CaptureLogger {
    fn print(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

/// Scriptable sink: keeps the body, accepts every status change, can
/// refuse writes, cap them, or hand out a prepared connection
pub struct MockSink {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
    fail_writes: bool,
    write_limit: Option<usize>,
    overreport: usize,
    connection: Option<RawConnection>,
    hijacked: bool,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            status: None,
            headers: HeaderMap::new(),
            body: Vec::new(),
            fail_writes: false,
            write_limit: None,
            overreport: 0,
            connection: None,
            hijacked: false,
        }
    }

    /// Sink whose writes always fail
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    /// Accept at most `limit` bytes per write
    pub fn with_write_limit(mut self, limit: usize) -> Self {
        self.write_limit = Some(limit);
        self
    }

    /// Claim `extra` more bytes per write than were actually taken
    pub fn with_overreport(mut self, extra: usize) -> Self {
        self.overreport = extra;
        self
    }

    pub fn with_connection(mut self, conn: impl Connection) -> Self {
        self.connection = Some(Box::new(conn));
        self
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn was_hijacked(&self) -> bool {
        self.hijacked
    }
}

impl ResponseSink for MockSink {
    fn header(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        if self.fail_writes {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "mock sink refuses writes",
            )));
        }
        let n = self.write_limit.map_or(buf.len(), |limit| limit.min(buf.len()));
        self.body.extend_from_slice(&buf[..n]);
        Ok(n + self.overreport)
    }

    fn write_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    fn hijack(&mut self) -> Result<Hijacked> {
        let conn = self.connection.take().ok_or(Error::CapabilityUnsupported)?;
        self.hijacked = true;
        Ok(futures::future::ready(Ok(conn)).boxed())
    }
}
