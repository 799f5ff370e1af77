//! Metadata-only response sink

use super::ResponseSink;
use crate::error::Result;
use hyper::{HeaderMap, StatusCode};

/// Response sink that counts body bytes instead of keeping them.
///
/// Used as the secondary side of a [`Tee`](super::Tee) so the tracer can
/// report status and size without buffering a copy of the body. When it
/// sits behind a tee its own header map stays empty, since header access
/// on the tee goes to the primary sink only.
#[derive(Debug, Clone)]
pub struct ResponseRecorder {
    status: StatusCode,
    bytes: u64,
    headers: HeaderMap,
}

impl ResponseRecorder {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            bytes: 0,
            headers: HeaderMap::new(),
        }
    }

    /// Last status written, `200 OK` if none was
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Total body bytes written so far
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl Default for ResponseRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseSink for ResponseRecorder {
    fn header(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.bytes += buf.len() as u64;
        Ok(buf.len())
    }

    fn write_status(&mut self, status: StatusCode) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_new_recorder_defaults_to_ok() {
        let recorder = ResponseRecorder::new();
        assert_eq!(recorder.status(), StatusCode::OK);
        assert_eq!(recorder.bytes(), 0);
        assert!(recorder.headers().is_empty());
    }

    #[test]
    fn test_write_counts_bytes() {
        let mut recorder = ResponseRecorder::new();
        let chunks: [&[u8]; 4] = [b"hello", b"", b", ", b"world"];
        for chunk in chunks {
            assert_eq!(recorder.write(chunk).unwrap(), chunk.len());
        }
        assert_eq!(recorder.bytes(), 12);
    }

    #[test]
    fn test_last_status_wins() {
        let mut recorder = ResponseRecorder::new();
        recorder.write_status(StatusCode::CREATED);
        recorder.write(b"body").unwrap();
        recorder.write_status(StatusCode::NOT_FOUND);
        assert_eq!(recorder.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_header_writes_land_in_own_map() {
        let mut recorder = ResponseRecorder::new();
        recorder
            .header()
            .append("x-trace", "a".parse().unwrap());
        recorder
            .header()
            .append("x-trace", "b".parse().unwrap());
        assert_eq!(recorder.headers().get_all("x-trace").iter().count(), 2);
    }

    #[test]
    fn test_hijack_is_unsupported() {
        let mut recorder = ResponseRecorder::new();
        assert!(matches!(
            recorder.hijack(),
            Err(Error::CapabilityUnsupported)
        ));
    }
}
