//! Request handlers written against [`ResponseSink`]

use crate::sink::ResponseSink;
use async_trait::async_trait;
use futures::future::BoxFuture;
use hyper::{Body, Request};
use std::sync::Arc;

/// Serves one request by writing its response into `w`.
///
/// Handlers run to completion for each request; a panic propagates to the
/// server exactly as it would from any other hyper service.
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    async fn serve(&self, w: &mut dyn ResponseSink, req: Request<Body>);
}

#[async_trait]
impl<H: Handler + ?Sized> Handler for Arc<H> {
    async fn serve(&self, w: &mut dyn ResponseSink, req: Request<Body>) {
        (**self).serve(w, req).await
    }
}

/// Handler built from a closure, see [`handler_fn`]
#[derive(Clone)]
pub struct HandlerFn<F> {
    f: F,
}

/// Wrap a closure returning a boxed future as a [`Handler`]:
///
/// ```
/// use futures::FutureExt;
/// use http_tracer::handler::handler_fn;
///
/// let hello = handler_fn(|w, _req| {
///     async move {
///         let _ = w.write(b"hello");
///     }
///     .boxed()
/// });
/// # let _ = hello;
/// ```
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: for<'a> Fn(&'a mut dyn ResponseSink, Request<Body>) -> BoxFuture<'a, ()>
        + Send
        + Sync
        + 'static,
{
    HandlerFn { f }
}

#[async_trait]
impl<F> Handler for HandlerFn<F>
where
    F: for<'a> Fn(&'a mut dyn ResponseSink, Request<Body>) -> BoxFuture<'a, ()>
        + Send
        + Sync
        + 'static,
{
    async fn serve(&self, w: &mut dyn ResponseSink, req: Request<Body>) {
        (self.f)(w, req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::ResponseRecorder;
    use futures::FutureExt;
    use hyper::StatusCode;

    #[tokio::test]
    async fn test_handler_fn_writes_through_sink() {
        let handler = handler_fn(|w, req| {
            async move {
                w.write_status(StatusCode::CREATED);
                let _ = w.write(req.uri().path().as_bytes());
            }
            .boxed()
        });

        let mut recorder = ResponseRecorder::new();
        let req = Request::get("/abc").body(Body::empty()).unwrap();
        handler.serve(&mut recorder, req).await;

        assert_eq!(recorder.status(), StatusCode::CREATED);
        assert_eq!(recorder.bytes(), 4);
    }

    #[tokio::test]
    async fn test_arc_handler_delegates() {
        let handler = Arc::new(handler_fn(|w, _req| {
            async move {
                let _ = w.write(b"xy");
            }
            .boxed()
        }));

        let mut recorder = ResponseRecorder::new();
        let req = Request::get("/").body(Body::empty()).unwrap();
        handler.serve(&mut recorder, req).await;
        assert_eq!(recorder.bytes(), 2);
    }
}
