//! xgpush-client
//!
//! Caller-facing client for the XG push REST API (v2).
//!
//! It includes:
//! - the endpoint catalogue
//! - per-endpoint methods that shape arguments into signed requests
//! - a blocking reqwest transport
//!
//! Signing, dispatch and response decoding live in `xgpush-core`.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod message;

pub use client::PushClient;
pub use config::{ClientConfig, TransportConfig};
pub use endpoint::{Endpoint, DEFAULT_BASE_URL};
pub use error::{ClientError, ClientResult};
pub use http::ReqwestTransport;
pub use message::{IosEnvironment, MessageType, Platform, PushMessage, TagOperation};

pub use xgpush_core::credentials::Credentials;
pub use xgpush_core::envelope::{Outcome, ResponseEnvelope};
pub use xgpush_core::params::ParamSet;
