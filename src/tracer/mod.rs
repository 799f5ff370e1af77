//! Request tracing around a [`Handler`]
//!
//! [`Tracer`] logs a start line when a request arrives and an end line
//! once the wrapped handler returns:
//!
//! ```text
//! GET /foo?x=1
//! Returned 201 of GET /foo?x=1 with 5 bytes in 0 ms
//! ```
//!
//! The status and byte count come from a [`ResponseRecorder`] fed through a
//! [`Tee`], so the response the client receives is exactly what the
//! handler wrote.

use crate::handler::Handler;
use crate::sink::{ResponseRecorder, ResponseSink, Tee};
use crate::utils::{comma, duration_to_ms};
use async_trait::async_trait;
use hyper::{Body, Method, Request, StatusCode, Uri};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

/// Destination for the two lines logged per request.
///
/// Shared by every in-flight request, so implementations must tolerate
/// concurrent calls. Each line ends with `\n`.
pub trait RequestLogger: Send + Sync {
    fn print(&self, line: &str);
}

/// Default logger: forwards lines to the `log` facade at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct StdLogger;

impl RequestLogger for StdLogger {
    fn print(&self, line: &str) {
        log::info!(target: "http_tracer", "{}", line.trim_end());
    }
}

/// Process-wide [`StdLogger`] used by [`Tracer::new`]
pub fn default_logger() -> Arc<dyn RequestLogger> {
    static DEFAULT: OnceLock<Arc<dyn RequestLogger>> = OnceLock::new();
    Arc::clone(DEFAULT.get_or_init(|| Arc::new(StdLogger)))
}

/// Line logged before the handler runs
pub fn format_started(method: &Method, uri: &Uri) -> String {
    format!("{} {}\n", method, uri)
}

/// Line logged after the handler returns
pub fn format_completed(
    status: StatusCode,
    method: &Method,
    uri: &Uri,
    bytes: u64,
    elapsed: Duration,
) -> String {
    format!(
        "Returned {} of {} {} with {} bytes in {} ms\n",
        status.as_u16(),
        method,
        uri,
        comma(bytes),
        duration_to_ms(elapsed)
    )
}

/// Handler wrapper that logs method, URL, status, size and latency
pub struct Tracer<H> {
    inner: H,
    logger: Arc<dyn RequestLogger>,
}

impl<H: Handler> Tracer<H> {
    /// Trace `inner` through the process-wide default logger
    pub fn new(inner: H) -> Self {
        Self::with_logger(inner, default_logger())
    }

    pub fn with_logger(inner: H, logger: Arc<dyn RequestLogger>) -> Self {
        Self { inner, logger }
    }
}

#[async_trait]
impl<H: Handler> Handler for Tracer<H> {
    async fn serve(&self, w: &mut dyn ResponseSink, req: Request<Body>) {
        let method = req.method().clone();
        let uri = req.uri().clone();
        let mut recorder = ResponseRecorder::new();

        self.logger.print(&format_started(&method, &uri));
        let start = Instant::now();
        {
            let mut tee = Tee::new(&mut *w, &mut recorder);
            self.inner.serve(&mut tee, req).await;
        }
        let elapsed = start.elapsed();

        self.logger.print(&format_completed(
            recorder.status(),
            &method,
            &uri,
            recorder.bytes(),
            elapsed,
        ));
    }
}
