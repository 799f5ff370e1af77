//! Demo handler served by the `http-tracer` binary

use crate::handler::Handler;
use crate::sink::ResponseSink;
use crate::utils::{connection_has, upgrade_protocol};
use crate::version;
use async_trait::async_trait;
use hyper::header::{HeaderValue, ALLOW, CONNECTION, CONTENT_TYPE, UPGRADE};
use hyper::{Body, Method, Request, StatusCode};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Protocol name accepted for the echo upgrade
pub const ECHO_PROTOCOL: &str = "echo";

/// Small handler exercising every part of the sink contract:
///
/// - `GET /version` answers with the version report as JSON
/// - `Upgrade: echo` switches protocols and echoes raw bytes until EOF
/// - anything else gets a plain-text greeting
#[derive(Debug, Default, Clone)]
pub struct DemoHandler;

impl DemoHandler {
    pub fn new() -> Self {
        Self
    }

    fn version(&self, w: &mut dyn ResponseSink, req: &Request<Body>) {
        if req.method() != Method::GET {
            w.header().insert(ALLOW, HeaderValue::from_static("GET"));
            w.write_status(StatusCode::METHOD_NOT_ALLOWED);
            write_all(w, b"Method Not Allowed");
            return;
        }

        match serde_json::to_vec(version::info()) {
            Ok(body) => {
                w.header()
                    .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                write_all(w, &body);
            }
            Err(e) => {
                warn!("Failed to serialize version report: {}", e);
                w.write_status(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }

    fn echo(&self, w: &mut dyn ResponseSink) {
        let pending = match w.hijack() {
            Ok(pending) => pending,
            Err(e) => {
                debug!("Echo upgrade refused: {}", e);
                w.write_status(StatusCode::BAD_REQUEST);
                write_all(w, b"connection cannot be upgraded\n");
                return;
            }
        };

        w.write_status(StatusCode::SWITCHING_PROTOCOLS);
        w.header()
            .insert(UPGRADE, HeaderValue::from_static(ECHO_PROTOCOL));
        w.header()
            .insert(CONNECTION, HeaderValue::from_static("upgrade"));

        tokio::spawn(async move {
            let conn = match pending.await {
                Ok(conn) => conn,
                Err(e) => {
                    warn!("Echo upgrade failed: {}", e);
                    return;
                }
            };
            let (mut reader, mut writer) = tokio::io::split(conn);
            match tokio::io::copy(&mut reader, &mut writer).await {
                Ok(n) => debug!("Echoed {} bytes", n),
                Err(e) => debug!("Echo connection closed: {}", e),
            }
            let _ = writer.shutdown().await;
        });
    }
}

/// Write `buf` in full, giving up quietly if the sink refuses
fn write_all(w: &mut dyn ResponseSink, mut buf: &[u8]) {
    while !buf.is_empty() {
        match w.write(buf) {
            Ok(0) => return,
            Ok(n) => buf = &buf[n..],
            Err(e) => {
                debug!("Response write failed: {}", e);
                return;
            }
        }
    }
}

#[async_trait]
impl Handler for DemoHandler {
    async fn serve(&self, w: &mut dyn ResponseSink, req: Request<Body>) {
        let wants_echo = upgrade_protocol(&req)
            .map_or(false, |p| p.eq_ignore_ascii_case(ECHO_PROTOCOL))
            && connection_has(&req, "upgrade");

        if wants_echo {
            self.echo(w);
        } else if req.uri().path() == "/version" {
            self.version(w, &req);
        } else {
            w.header()
                .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
            write_all(w, b"hello from http-tracer\n");
        }
    }
}
