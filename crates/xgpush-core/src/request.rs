//! Signed requests.
//!
//! A [`SignedRequest`] is built once per call from the caller's parameters,
//! the credentials and a timestamp read at dispatch time. After construction
//! nothing about it can change; its form pairs are sent verbatim.

use crate::credentials::Credentials;
use crate::errors::{XgError, XgResult};
use crate::fields;
use crate::params::ParamSet;
use crate::signature::{derive_signature, verify_signature, SIGN_FIELD};

/// A fully stamped and signed request, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    endpoint: String,
    fields: ParamSet,
    sign: String,
    timestamp: i64,
}

impl SignedRequest {
    /// Stamp `access_id`, `timestamp` and `valid_time` onto `params` and sign.
    ///
    /// A caller-supplied `sign` is discarded; caller-supplied values for the
    /// stamped fields are overwritten.
    pub fn build(
        endpoint_url: &str,
        mut params: ParamSet,
        credentials: &Credentials,
        now_unix_seconds: i64,
    ) -> XgResult<Self> {
        if endpoint_url.trim().is_empty() {
            return Err(XgError::invalid_argument("endpoint url must not be empty"));
        }

        if params.remove(SIGN_FIELD).is_some() {
            tracing::debug!(endpoint = endpoint_url, "discarding caller-supplied sign field");
        }

        params.set(fields::ACCESS_ID, credentials.access_id())?;
        params.set_display(fields::TIMESTAMP, now_unix_seconds)?;
        params.set_display(fields::VALID_TIME, credentials.valid_time_seconds())?;

        let sign = derive_signature(endpoint_url, &params, credentials.secret_key());

        Ok(Self {
            endpoint: endpoint_url.to_string(),
            fields: params,
            sign,
            timestamp: now_unix_seconds,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Signed fields, excluding `sign`.
    pub fn fields(&self) -> &ParamSet {
        &self.fields
    }

    pub fn sign(&self) -> &str {
        &self.sign
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Body pairs in wire order: sorted fields, then `sign`.
    pub fn form_pairs(&self) -> Vec<(&str, &str)> {
        let mut out: Vec<(&str, &str)> = self.fields.sorted_pairs().collect();
        out.push((SIGN_FIELD, self.sign.as_str()));
        out
    }

    /// Recompute the signature the way the server would.
    pub fn verify(&self, secret_key: &str) -> bool {
        verify_signature(&self.endpoint, &self.fields, secret_key, &self.sign)
    }
}
