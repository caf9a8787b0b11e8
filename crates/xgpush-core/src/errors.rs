//! Error types for xgpush-core.
//!
//! Only pre-flight failures are represented here. Anything that goes wrong
//! after a request has been signed (network, timeouts, undecodable bodies) is
//! converted into a [`crate::envelope::ResponseEnvelope`] by the dispatcher and
//! never surfaces as an `Err`.

use thiserror::Error;

/// Result alias used across the core crate.
pub type XgResult<T> = Result<T, XgError>;

/// Errors raised synchronously, before any network activity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum XgError {
    /// Malformed or missing input to a core operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Serializing a caller value into a parameter failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl XgError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Serialization(_) => "serialization",
        }
    }
}
