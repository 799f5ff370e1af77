//! Response sinks: the output side of a request handler
//!
//! A handler builds its response by writing headers, a status code, and
//! body bytes into a [`ResponseSink`]. Three implementations ship with the
//! crate:
//!
//! - [`ResponseWriter`] backs a real hyper response
//! - [`ResponseRecorder`] only accounts status and byte count
//! - [`Tee`] fans every operation out to two other sinks

pub mod recorder;
pub mod tee;
pub mod writer;

pub use recorder::ResponseRecorder;
pub use tee::{tee, Tee};
pub use writer::ResponseWriter;

use crate::error::{Error, Result};
use futures::future::BoxFuture;
use hyper::{HeaderMap, StatusCode};
use tokio::io::{AsyncRead, AsyncWrite};

/// Bidirectional byte stream handed out by a hijack
pub trait Connection: AsyncRead + AsyncWrite + Send + Unpin + 'static {}

impl<T> Connection for T where T: AsyncRead + AsyncWrite + Send + Unpin + 'static {}

/// Raw connection taken over from the server.
///
/// Bytes the server had already buffered from the client are replayed
/// first on read, so nothing sent ahead of the upgrade is lost.
pub type RawConnection = Box<dyn Connection>;

/// Pending takeover of the raw connection.
///
/// Resolves once the response has gone out, normally a
/// `101 Switching Protocols`.
pub type Hijacked = BoxFuture<'static, Result<RawConnection>>;

/// The response-writing contract handlers are written against.
pub trait ResponseSink: Send {
    /// Header collection that will be sent with the response
    fn header(&mut self) -> &mut HeaderMap;

    /// Append body bytes, returning how many were accepted
    fn write(&mut self, buf: &[u8]) -> Result<usize>;

    /// Set the response status code
    fn write_status(&mut self, status: StatusCode);

    /// Take over the underlying connection.
    ///
    /// Sinks without a connection fail with [`Error::CapabilityUnsupported`].
    fn hijack(&mut self) -> Result<Hijacked> {
        Err(Error::CapabilityUnsupported)
    }
}

impl<S: ResponseSink + ?Sized> ResponseSink for &mut S {
    fn header(&mut self) -> &mut HeaderMap {
        (**self).header()
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        (**self).write(buf)
    }

    fn write_status(&mut self, status: StatusCode) {
        (**self).write_status(status)
    }

    fn hijack(&mut self) -> Result<Hijacked> {
        (**self).hijack()
    }
}

impl<S: ResponseSink + ?Sized> ResponseSink for Box<S> {
    fn header(&mut self) -> &mut HeaderMap {
        (**self).header()
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        (**self).write(buf)
    }

    fn write_status(&mut self, status: StatusCode) {
        (**self).write_status(status)
    }

    fn hijack(&mut self) -> Result<Hijacked> {
        (**self).hijack()
    }
}
