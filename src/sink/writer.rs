//! Response sink backed by a hyper response

use super::{Hijacked, RawConnection, ResponseSink};
use crate::error::{Error, Result};
use crate::utils::wants_upgrade;
use bytes::BytesMut;
use futures::FutureExt;
use hyper::upgrade::OnUpgrade;
use hyper::{Body, HeaderMap, Request, Response, StatusCode};
use tracing::{debug, warn};

/// The real response for one request.
///
/// Status, headers and body are buffered while the handler runs and turned
/// into a [`Response`] by [`ResponseWriter::into_response`]. Until the first
/// body write the last [`write_status`](ResponseSink::write_status) wins;
/// the first body write commits the status (`200 OK` if none was set) and
/// later status changes are ignored, as they would be on the wire.
///
/// A hijack does not send anything by itself: the status and headers still
/// form the handshake response (normally `101 Switching Protocols`) that
/// hyper sends before handing the connection over. Body writes after a
/// hijack fail with [`Error::Hijacked`].
pub struct ResponseWriter {
    status: Option<StatusCode>,
    committed: bool,
    headers: HeaderMap,
    body: BytesMut,
    upgrade: Option<OnUpgrade>,
    hijacked: bool,
}

impl ResponseWriter {
    /// Writer for `req`, taking its upgrade handle when the client asked
    /// for one (an `Upgrade` header or a `CONNECT`)
    pub fn new(req: &mut Request<Body>) -> Self {
        let upgrade = if wants_upgrade(req) {
            Some(hyper::upgrade::on(req))
        } else {
            None
        };
        Self {
            upgrade,
            ..Self::detached()
        }
    }

    /// Writer with no connection behind it; hijacking always fails
    pub fn detached() -> Self {
        Self {
            status: None,
            committed: false,
            headers: HeaderMap::new(),
            body: BytesMut::new(),
            upgrade: None,
            hijacked: false,
        }
    }

    /// Status that will be sent, `200 OK` unless one was written
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn is_hijacked(&self) -> bool {
        self.hijacked
    }

    pub fn into_response(self) -> Response<Body> {
        let mut response = Response::new(Body::from(self.body.freeze()));
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}

impl ResponseSink for ResponseWriter {
    fn header(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        if self.hijacked {
            return Err(Error::Hijacked);
        }
        if !self.committed {
            self.committed = true;
            self.status.get_or_insert(StatusCode::OK);
        }
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn write_status(&mut self, status: StatusCode) {
        if self.committed {
            warn!(
                "Superfluous write_status({}), already sent {}",
                status,
                self.status()
            );
            return;
        }
        self.status = Some(status);
    }

    fn hijack(&mut self) -> Result<Hijacked> {
        if self.hijacked {
            return Err(Error::Hijacked);
        }
        let on_upgrade = self.upgrade.take().ok_or(Error::CapabilityUnsupported)?;
        self.hijacked = true;
        debug!("Connection hijacked, upgrade completes after the response is sent");
        let pending = async move {
            let upgraded = on_upgrade.await?;
            Ok::<RawConnection, Error>(Box::new(upgraded))
        };
        Ok(pending.boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(builder: hyper::http::request::Builder) -> Request<Body> {
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_defaults_to_ok() {
        let writer = ResponseWriter::detached();
        assert_eq!(writer.status(), StatusCode::OK);
        let response = writer.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_last_status_before_body_wins() {
        let mut writer = ResponseWriter::detached();
        writer.write_status(StatusCode::CREATED);
        writer.write_status(StatusCode::NOT_FOUND);
        assert_eq!(writer.status(), StatusCode::NOT_FOUND);

        writer.write(b"gone").unwrap();
        writer.write_status(StatusCode::OK);
        assert_eq!(writer.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_body_write_commits_implicit_ok() {
        let mut writer = ResponseWriter::detached();
        writer.write(b"hi").unwrap();
        writer.write_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(writer.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_into_response_carries_everything() {
        let mut writer = ResponseWriter::detached();
        writer
            .header()
            .insert("content-type", "text/plain".parse().unwrap());
        writer.write_status(StatusCode::ACCEPTED);
        writer.write(b"hello, ").unwrap();
        writer.write(b"world").unwrap();

        let response = writer.into_response();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(response.headers()["content-type"], "text/plain");
        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        assert_eq!(&body[..], b"hello, world");
    }

    #[test]
    fn test_plain_request_cannot_hijack() {
        let mut req = request(Request::get("/"));
        let mut writer = ResponseWriter::new(&mut req);
        assert!(matches!(
            writer.hijack(),
            Err(Error::CapabilityUnsupported)
        ));
        assert!(!writer.is_hijacked());
        assert!(writer.write(b"still fine").is_ok());
    }

    #[test]
    fn test_upgrade_request_hijacks_once() {
        let mut req = request(Request::get("/ws").header("upgrade", "websocket"));
        let mut writer = ResponseWriter::new(&mut req);
        assert!(writer.hijack().is_ok());
        assert!(writer.is_hijacked());
        assert!(matches!(writer.hijack(), Err(Error::Hijacked)));
        assert!(matches!(writer.write(b"late"), Err(Error::Hijacked)));

        writer.write_status(StatusCode::SWITCHING_PROTOCOLS);
        assert_eq!(
            writer.into_response().status(),
            StatusCode::SWITCHING_PROTOCOLS
        );
    }
}
