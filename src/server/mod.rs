//! Hyper server serving a [`Handler`]

pub mod demo;

use crate::error::Result;
use crate::handler::Handler;
use crate::sink::ResponseWriter;
use crate::{log_debug, log_error, log_info};
use hyper::server::conn::{AddrIncoming, AddrStream};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server};
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

pub use demo::DemoHandler;

/// Listener bound and ready to serve a handler
pub struct HttpServer {
    incoming: AddrIncoming,
    local_addr: SocketAddr,
}

impl HttpServer {
    /// Bind the listening socket; port 0 picks a free port
    pub fn bind(addr: SocketAddr) -> Result<Self> {
        let incoming = AddrIncoming::bind(&addr)?;
        let local_addr = incoming.local_addr();
        log_info!("Server bound on {}", local_addr);
        Ok(Self {
            incoming,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve `handler` until the server fails
    pub async fn serve<H: Handler>(self, handler: H) -> Result<()> {
        self.serve_with_shutdown(handler, std::future::pending())
            .await
    }

    /// Serve `handler` until `signal` completes, then drain open connections
    pub async fn serve_with_shutdown<H, F>(self, handler: H, signal: F) -> Result<()>
    where
        H: Handler,
        F: Future<Output = ()>,
    {
        let handler = Arc::new(handler);
        let make_svc = make_service_fn(move |conn: &AddrStream| {
            let remote_addr = conn.remote_addr();
            let handler = Arc::clone(&handler);
            log_debug!("New connection from: {}", remote_addr);

            async move {
                Ok::<_, Infallible>(service_fn(move |req| {
                    let handler = Arc::clone(&handler);
                    async move { Ok::<_, Infallible>(dispatch(handler.as_ref(), req).await) }
                }))
            }
        });

        let server = Server::builder(self.incoming)
            .serve(make_svc)
            .with_graceful_shutdown(signal);

        log_info!("Server listening on {}, waiting for connections", self.local_addr);
        if let Err(e) = server.await {
            log_error!("Server error: {}", e);
            return Err(e.into());
        }
        log_info!("Server on {} stopped", self.local_addr);
        Ok(())
    }
}

/// Run `handler` for one request against a fresh [`ResponseWriter`]
pub async fn dispatch<H: Handler + ?Sized>(handler: &H, mut req: Request<Body>) -> Response<Body> {
    let mut writer = ResponseWriter::new(&mut req);
    handler.serve(&mut writer, req).await;
    writer.into_response()
}
