//! Configuration structures for xgpush-core.
//!
//! The core crate does not read environment variables. All configuration
//! is provided explicitly by the caller (façade, CLI).

use crate::errors::{XgError, XgResult};

/// Dispatcher configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Response bodies larger than this are treated as a protocol failure.
    pub max_response_bytes: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_response_bytes: crate::defaults::MAX_RESPONSE_BYTES,
        }
    }
}

/// Validate a dispatcher configuration.
pub fn validate_config(cfg: &DispatchConfig) -> XgResult<()> {
    if cfg.max_response_bytes == 0 {
        return Err(XgError::invalid_argument(
            "max_response_bytes must be greater than zero",
        ));
    }

    Ok(())
}
