use std::process::ExitCode;

use anyhow::Result;
use serde::Serialize;

use xgpush_core::clock::{Clock, SystemClock};
use xgpush_core::request::SignedRequest;

use super::Session;
use crate::io::input::parse_params;
use crate::output;

#[derive(Serialize)]
struct SignOutput<'a> {
    endpoint: &'a str,
    fields: &'a xgpush_client::ParamSet,
    sign: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    matches: Option<bool>,
}

pub fn run(
    session: &Session,
    url: &str,
    timestamp: Option<i64>,
    check: Option<&str>,
    raw_params: &[String],
) -> Result<ExitCode> {
    let credentials = session.credentials()?;
    let params = parse_params(raw_params)?;
    let now = timestamp.unwrap_or_else(|| SystemClock.now_unix_seconds());

    let req = SignedRequest::build(url, params, &credentials, now)?;
    let matches = check.map(|candidate| {
        xgpush_core::signature::verify_signature(req.endpoint(), req.fields(), credentials.secret_key(), candidate)
    });

    output::print(&SignOutput {
        endpoint: req.endpoint(),
        fields: req.fields(),
        sign: req.sign(),
        matches,
    })?;

    Ok(match matches {
        Some(false) => ExitCode::from(super::REJECTED),
        _ => ExitCode::SUCCESS,
    })
}
