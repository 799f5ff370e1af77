//! Duplicating response sink

use super::{Hijacked, ResponseSink};
use crate::error::Result;
use hyper::{HeaderMap, StatusCode};
use tracing::debug;

/// Response sink that mirrors every write onto a secondary sink.
///
/// The primary is authoritative: its header map is the one exposed, its
/// result is the one returned, and it alone can be hijacked. The secondary
/// only observes, and a failure there never reaches the caller.
pub struct Tee<A, B> {
    primary: A,
    secondary: B,
}

/// Build a [`Tee`] over `primary` and `secondary`
pub fn tee<A: ResponseSink, B: ResponseSink>(primary: A, secondary: B) -> Tee<A, B> {
    Tee::new(primary, secondary)
}

impl<A: ResponseSink, B: ResponseSink> Tee<A, B> {
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }

    pub fn into_inner(self) -> (A, B) {
        (self.primary, self.secondary)
    }
}

impl<A: ResponseSink, B: ResponseSink> ResponseSink for Tee<A, B> {
    fn header(&mut self) -> &mut HeaderMap {
        self.primary.header()
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let written = self.primary.write(buf)?;
        // Mirror only what the primary accepted so the counts agree.
        let accepted = &buf[..written.min(buf.len())];
        if let Err(e) = self.secondary.write(accepted) {
            debug!("Secondary sink rejected {} bytes: {}", written, e);
        }
        Ok(written)
    }

    fn write_status(&mut self, status: StatusCode) {
        self.primary.write_status(status);
        self.secondary.write_status(status);
    }

    fn hijack(&mut self) -> Result<Hijacked> {
        self.primary.hijack()
    }
}
