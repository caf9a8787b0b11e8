use std::process::ExitCode;

use anyhow::{anyhow, Result};

use xgpush_client::{Endpoint, ReqwestTransport};
use xgpush_core::dispatch::Dispatcher;

use super::{call, Session};
use crate::io::input::parse_params;

/// Resolve `target` as an endpoint name (`push.single_device`) or an absolute URL.
enum Target {
    Known(Endpoint),
    Url(String),
}

fn resolve(target: &str) -> Result<Target> {
    if let Some(ep) = Endpoint::ALL.iter().find(|ep| ep.name() == target) {
        return Ok(Target::Known(*ep));
    }
    if target.starts_with("http://") || target.starts_with("https://") {
        return Ok(Target::Url(target.to_string()));
    }
    let known: Vec<String> = Endpoint::ALL.iter().map(|ep| ep.name()).collect();
    Err(anyhow!("unknown endpoint {target:?}; expected a URL or one of: {}", known.join(", ")))
}

pub fn run(session: &Session, target: &str, raw_params: &[String]) -> Result<ExitCode> {
    let params = parse_params(raw_params)?;
    match resolve(target)? {
        Target::Known(ep) => {
            let client = session.client()?;
            call(&ep.name(), || client.call(ep, params))
        }
        Target::Url(url) => {
            let credentials = session.credentials()?;
            let cfg = session.config();
            let transport = ReqwestTransport::new(&cfg.transport)?
                .with_body_limit(cfg.dispatch.max_response_bytes);
            let dispatcher = Dispatcher::new(transport).with_config(cfg.dispatch.clone())?;
            call(&url, || dispatcher.send(&url, params, &credentials))
        }
    }
}
