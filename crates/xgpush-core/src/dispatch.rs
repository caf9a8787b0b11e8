//! Request dispatch.
//!
//! [`Dispatcher::send`] is the whole pipeline for one call:
//! - validate arguments (the only step that can return `Err`)
//! - stamp `access_id` / `timestamp` / `valid_time`, with the clock read now
//! - sign and append `sign`
//! - POST the form through the transport
//! - decode the body into a [`ResponseEnvelope`]
//!
//! Transport and decoding failures come back as an envelope with
//! `ret_code = -1`. Nothing is retried here: a retry needs a fresh timestamp
//! and signature, so callers reissue the call instead.

use crate::clock::{Clock, SystemClock};
use crate::config::{validate_config, DispatchConfig};
use crate::credentials::Credentials;
use crate::envelope::ResponseEnvelope;
use crate::errors::XgResult;
use crate::params::ParamSet;
use crate::request::SignedRequest;
use crate::transport::HttpTransport;

/// Stateless request pipeline over an injected transport and clock.
///
/// Holds no per-call state, so one dispatcher can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Dispatcher<T, C = SystemClock> {
    transport: T,
    clock: C,
    config: DispatchConfig,
}

impl<T: HttpTransport> Dispatcher<T, SystemClock> {
    pub fn new(transport: T) -> Self {
        Self::with_clock(transport, SystemClock)
    }
}

impl<T: HttpTransport, C: Clock> Dispatcher<T, C> {
    pub fn with_clock(transport: T, clock: C) -> Self {
        Self {
            transport,
            clock,
            config: DispatchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DispatchConfig) -> XgResult<Self> {
        validate_config(&config)?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Stamp and sign without sending.
    pub fn prepare(
        &self,
        endpoint_url: &str,
        params: ParamSet,
        credentials: &Credentials,
    ) -> XgResult<SignedRequest> {
        let now = self.clock.now_unix_seconds();
        SignedRequest::build(endpoint_url, params, credentials, now)
    }

    /// Sign and send one request.
    pub fn send(
        &self,
        endpoint_url: &str,
        params: ParamSet,
        credentials: &Credentials,
    ) -> XgResult<ResponseEnvelope> {
        let req = self.prepare(endpoint_url, params, credentials)?;
        Ok(self.execute(&req))
    }

    /// Send an already signed request. Never fails; failures become envelopes.
    pub fn execute(&self, req: &SignedRequest) -> ResponseEnvelope {
        tracing::debug!(
            endpoint = req.endpoint(),
            timestamp = req.timestamp(),
            fields = req.fields().len(),
            "dispatching signed request"
        );

        let body = match self.transport.post_form(req.endpoint(), &req.form_pairs()) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(endpoint = req.endpoint(), error = %e, "transport failure");
                return ResponseEnvelope::local_failure(e.to_string());
            }
        };

        if body.len() > self.config.max_response_bytes {
            tracing::warn!(
                endpoint = req.endpoint(),
                bytes = body.len(),
                limit = self.config.max_response_bytes,
                "response body too large"
            );
            return ResponseEnvelope::local_failure(format!(
                "response body exceeds {} bytes",
                self.config.max_response_bytes
            ));
        }

        match ResponseEnvelope::from_slice(&body) {
            Ok(env) => {
                if !env.is_success() {
                    tracing::debug!(
                        endpoint = req.endpoint(),
                        ret_code = env.ret_code,
                        err_msg = %env.err_msg,
                        "request rejected by server"
                    );
                }
                env
            }
            Err(e) => {
                tracing::warn!(endpoint = req.endpoint(), error = %e, "undecodable response");
                ResponseEnvelope::local_failure(e.to_string())
            }
        }
    }
}
