//! Application credentials.

use std::fmt;

use crate::defaults::{DEFAULT_VALID_TIME_SECONDS, MAX_VALID_TIME_SECONDS};
use crate::errors::{XgError, XgResult};

/// Immutable credentials shared by every request a client issues.
///
/// `valid_time_seconds` together with the per-request `timestamp` bounds the
/// window in which the server accepts a signed request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_id: String,
    secret_key: String,
    valid_time_seconds: u32,
}

impl Credentials {
    /// Credentials with the default validity window.
    pub fn new(access_id: impl Into<String>, secret_key: impl Into<String>) -> XgResult<Self> {
        let access_id = access_id.into();
        let secret_key = secret_key.into();
        if access_id.trim().is_empty() {
            return Err(XgError::invalid_argument("access_id must not be empty"));
        }
        if secret_key.is_empty() {
            return Err(XgError::invalid_argument("secret_key must not be empty"));
        }
        Ok(Self {
            access_id,
            secret_key,
            valid_time_seconds: DEFAULT_VALID_TIME_SECONDS,
        })
    }

    /// Override the validity window. Values outside `1..=600` fall back to 600.
    pub fn with_valid_time(mut self, seconds: u32) -> Self {
        self.valid_time_seconds = normalize_valid_time(seconds);
        self
    }

    pub fn access_id(&self) -> &str {
        &self.access_id
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn valid_time_seconds(&self) -> u32 {
        self.valid_time_seconds
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_id", &self.access_id)
            .field("secret_key", &"<redacted>")
            .field("valid_time_seconds", &self.valid_time_seconds)
            .finish()
    }
}

fn normalize_valid_time(seconds: u32) -> u32 {
    if seconds == 0 || seconds > MAX_VALID_TIME_SECONDS {
        DEFAULT_VALID_TIME_SECONDS
    } else {
        seconds
    }
}
