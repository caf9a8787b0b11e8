//! Client configuration.
//!
//! Explicit, caller-provided configuration. Nothing here reads the
//! environment; the CLI maps flags and env vars onto these structs.

use url::Url;
use xgpush_core::config::DispatchConfig;

use crate::endpoint::DEFAULT_BASE_URL;
use crate::error::{ClientError, ClientResult};

/// Top-level client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root that endpoint paths are appended to.
    pub base_url: String,
    pub transport: TransportConfig,
    pub dispatch: DispatchConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            transport: TransportConfig::default(),
            dispatch: DispatchConfig::default(),
        }
    }
}

/// Settings handed to the HTTP transport.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Whole-request timeout.
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            connect_timeout_ms: 5_000,
            user_agent: concat!("xgpush/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &ClientConfig) -> ClientResult<()> {
    let url = Url::parse(&cfg.base_url)
        .map_err(|e| ClientError::Config(format!("base_url is not a valid url: {e}")))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ClientError::Config(format!(
            "base_url must use http or https, got {}",
            url.scheme()
        )));
    }

    if cfg.transport.timeout_ms == 0 || cfg.transport.connect_timeout_ms == 0 {
        return Err(ClientError::Config(
            "timeouts must be greater than zero".to_string(),
        ));
    }

    if cfg.transport.connect_timeout_ms > cfg.transport.timeout_ms {
        return Err(ClientError::Config(
            "connect_timeout_ms must not exceed timeout_ms".to_string(),
        ));
    }

    xgpush_core::config::validate_config(&cfg.dispatch)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        validate_config(&ClientConfig::default()).unwrap();
    }

    #[test]
    fn bad_base_url_detected() {
        let mut cfg = ClientConfig::default();
        cfg.base_url = "not a url".to_string();
        assert!(validate_config(&cfg).is_err());

        cfg.base_url = "ftp://openapi.xg.qq.com/v2".to_string();
        let err = validate_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn invalid_timeouts_detected() {
        let mut cfg = ClientConfig::default();
        cfg.transport.connect_timeout_ms = cfg.transport.timeout_ms + 1;
        assert!(validate_config(&cfg).is_err());

        let mut cfg = ClientConfig::default();
        cfg.transport.timeout_ms = 0;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn user_agent_carries_version() {
        assert!(TransportConfig::default().user_agent.starts_with("xgpush/"));
    }
}
