//! HTTP transport seam.
//!
//! xgpush-core does not perform network I/O itself. The host (client crate,
//! CLI, tests) supplies an [`HttpTransport`] that owns connection reuse, TLS,
//! proxies and timeouts. The dispatcher only needs one operation: POST a
//! form and hand back the response body.

use thiserror::Error;

/// Failure reported by a transport. The dispatcher turns every variant into
/// a local failure envelope; none of them reach the caller as an `Err`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("http status {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("transport error: {0}")]
    Other(String),
}

/// Something that can POST a form-encoded body.
///
/// Implementations MUST:
/// - send `fields` in the given order, form-encoded as UTF-8
/// - use content type `application/x-www-form-urlencoded`
/// - return the raw body of a successful (2xx) response
pub trait HttpTransport: Send + Sync {
    fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<Vec<u8>, TransportError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<Vec<u8>, TransportError> {
        (**self).post_form(url, fields)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<Vec<u8>, TransportError> {
        (**self).post_form(url, fields)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for Box<T> {
    fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<Vec<u8>, TransportError> {
        (**self).post_form(url, fields)
    }
}

/// A transport that always fails (used when networking is disabled).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNetworkTransport;

impl HttpTransport for NoNetworkTransport {
    fn post_form(&self, url: &str, _fields: &[(&str, &str)]) -> Result<Vec<u8>, TransportError> {
        Err(TransportError::Other(format!(
            "network access is disabled; refusing to POST to {url}"
        )))
    }
}
