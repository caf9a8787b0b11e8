//! xgpush-core
//!
//! Core request pipeline for the XG push REST API:
//! - Canonical parameter sets with deterministic key ordering
//! - MD5 request signatures over the canonical set, endpoint and secret
//! - A dispatcher that stamps timing fields, signs and sends through an
//!   injected transport
//! - The uniform `{ret_code, err_msg, result}` response envelope
//!
//! This crate performs no network I/O of its own; see [`transport::HttpTransport`].

pub mod clock;
pub mod config;
pub mod credentials;
pub mod dispatch;
pub mod envelope;
pub mod errors;
pub mod params;
pub mod request;
pub mod signature;
pub mod transport;

pub use crate::errors::{XgError, XgResult};

/// Field names stamped onto every request.
/// These are part of the wire protocol and must not change.
pub mod fields {
    pub const ACCESS_ID: &str = "access_id";
    pub const TIMESTAMP: &str = "timestamp";
    pub const VALID_TIME: &str = "valid_time";
    pub const SIGN: &str = crate::signature::SIGN_FIELD;
}

/// Protocol defaults.
pub mod defaults {
    /// Validity window used when none (or an invalid one) is configured.
    pub const DEFAULT_VALID_TIME_SECONDS: u32 = 600;
    /// Largest validity window the server accepts.
    pub const MAX_VALID_TIME_SECONDS: u32 = 600;
    /// `ret_code` of a successful call.
    pub const SUCCESS_CODE: i64 = 0;
    /// `ret_code` reserved for failures produced on the client side.
    pub const LOCAL_FAILURE_CODE: i64 = -1;
    /// Default cap on decoded response bodies.
    pub const MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;
}

/// Convenience re-exports.
pub mod prelude {
    pub use crate::clock::{Clock, FixedClock, SystemClock};
    pub use crate::config::DispatchConfig;
    pub use crate::credentials::Credentials;
    pub use crate::dispatch::Dispatcher;
    pub use crate::envelope::{Outcome, ResponseEnvelope};
    pub use crate::params::ParamSet;
    pub use crate::request::SignedRequest;
    pub use crate::signature::{derive_signature, verify_signature};
    pub use crate::transport::{HttpTransport, NoNetworkTransport, TransportError};
    pub use crate::{XgError, XgResult};
}
