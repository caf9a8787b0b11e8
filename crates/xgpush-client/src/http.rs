//! reqwest-backed transport.

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use url::form_urlencoded;
use xgpush_core::defaults::MAX_RESPONSE_BYTES;
use xgpush_core::transport::{HttpTransport, TransportError};

use crate::config::TransportConfig;
use crate::error::{ClientError, ClientResult};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Blocking HTTP transport. Connection pooling and TLS are reqwest's.
///
/// Response bodies are read up to `max_body_bytes`; anything longer fails
/// without being buffered.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    max_body_bytes: usize,
}

impl ReqwestTransport {
    pub fn new(cfg: &TransportConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .connect_timeout(Duration::from_millis(cfg.connect_timeout_ms))
            .user_agent(cfg.user_agent.clone())
            .build()
            .map_err(|e| ClientError::Http(e.to_string()))?;
        Ok(Self::from_client(client))
    }

    /// Wrap an existing reqwest client.
    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            max_body_bytes: MAX_RESPONSE_BYTES,
        }
    }

    pub fn with_body_limit(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn body_limit(&self) -> usize {
        self.max_body_bytes
    }
}

/// Encode pairs as an `application/x-www-form-urlencoded` body, preserving order.
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields.iter())
        .finish()
}

impl HttpTransport for ReqwestTransport {
    fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<Vec<u8>, TransportError> {
        let body = encode_form(fields);
        tracing::trace!(url, bytes = body.len(), "POST form");

        let resp = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .map_err(classify)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let limit = self.max_body_bytes;
        if resp.content_length().is_some_and(|len| len > limit as u64) {
            return Err(too_large(limit));
        }

        // One byte past the limit is enough to tell an oversized body apart.
        let mut body = Vec::new();
        resp.take(limit as u64 + 1)
            .read_to_end(&mut body)
            .map_err(|e| TransportError::Body(e.to_string()))?;
        if body.len() > limit {
            return Err(too_large(limit));
        }
        Ok(body)
    }
}

fn too_large(limit: usize) -> TransportError {
    TransportError::Body(format!("response body exceeds {limit} bytes"))
}

fn classify(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}
