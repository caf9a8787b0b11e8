//! Response envelope.
//!
//! Every endpoint answers with a JSON object carrying `ret_code` and
//! `err_msg`. The endpoint payload is usually under `result`, but some
//! endpoints put their fields at the top level. Both shapes decode into
//! [`ResponseEnvelope::result`]; the core never interprets the payload.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::defaults::{LOCAL_FAILURE_CODE, SUCCESS_CODE};
use crate::errors::{XgError, XgResult};

/// Uniform result of every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub ret_code: i64,
    #[serde(default)]
    pub err_msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

/// Wire form: known members plus whatever else the endpoint returned.
#[derive(Debug, Deserialize)]
struct WireEnvelope {
    ret_code: i64,
    #[serde(default)]
    err_msg: Option<String>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(flatten)]
    rest: BTreeMap<String, Value>,
}

/// How a caller should read an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Well-formed answer from the server with a nonzero code.
    RemoteRejection,
    /// Transport or decoding failure produced on this side.
    LocalFailure,
}

impl ResponseEnvelope {
    /// Decode a response body.
    pub fn from_slice(body: &[u8]) -> XgResult<Self> {
        let wire: WireEnvelope = serde_json::from_slice(body)
            .map_err(|e| XgError::serialization(format!("invalid response body: {e}")))?;

        let result = match wire.result {
            Some(Value::Null) | None if wire.rest.is_empty() => None,
            Some(Value::Null) | None => Some(Value::Object(wire.rest.into_iter().collect())),
            Some(v) => Some(v),
        };

        Ok(Self {
            ret_code: wire.ret_code,
            err_msg: wire.err_msg.unwrap_or_default(),
            result,
        })
    }

    /// Envelope describing a failure that happened before a valid answer arrived.
    pub fn local_failure(msg: impl Into<String>) -> Self {
        let mut err_msg = msg.into();
        if err_msg.is_empty() {
            err_msg = "request failed".to_string();
        }
        Self {
            ret_code: LOCAL_FAILURE_CODE,
            err_msg,
            result: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.ret_code == SUCCESS_CODE
    }

    pub fn is_local_failure(&self) -> bool {
        self.ret_code == LOCAL_FAILURE_CODE
    }

    pub fn outcome(&self) -> Outcome {
        if self.is_success() {
            Outcome::Success
        } else if self.is_local_failure() {
            Outcome::LocalFailure
        } else {
            Outcome::RemoteRejection
        }
    }

    /// Decode the opaque payload into a caller type.
    ///
    /// Returns `Ok(None)` when the envelope carries no payload.
    pub fn result_as<T: DeserializeOwned>(&self) -> XgResult<Option<T>> {
        match &self.result {
            None => Ok(None),
            Some(v) => serde_json::from_value(v.clone())
                .map(Some)
                .map_err(|e| XgError::serialization(format!("unexpected result shape: {e}"))),
        }
    }
}
