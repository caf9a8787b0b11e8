use thiserror::Error;

use xgpush_core::XgError;

/// Errors raised while constructing a client.
///
/// Per-call failures use [`XgError`] (argument problems) or come back as
/// response envelopes (everything else).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Core(#[from] XgError),

    #[error("invalid client config: {0}")]
    Config(String),

    #[error("failed to build http client: {0}")]
    Http(String),
}

pub type ClientResult<T> = Result<T, ClientError>;
