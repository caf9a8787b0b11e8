use std::process::ExitCode;

use anyhow::Result;

use xgpush_client::Endpoint;

use super::{call, Session};
use crate::io::input::parse_tag_pairs;

pub fn cancel(session: &Session, push_id: &str) -> Result<ExitCode> {
    let client = session.client()?;
    call(&Endpoint::CancelTimingPush.name(), || client.cancel_timing_push(push_id))
}

pub fn set_tags(session: &Session, raw: &[String]) -> Result<ExitCode> {
    let pairs = parse_tag_pairs(raw)?;
    let client = session.client()?;
    call(&Endpoint::BatchSetTag.name(), || client.batch_set_tag(&pairs))
}

pub fn del_tags(session: &Session, raw: &[String]) -> Result<ExitCode> {
    let pairs = parse_tag_pairs(raw)?;
    let client = session.client()?;
    call(&Endpoint::BatchDelTag.name(), || client.batch_del_tag(&pairs))
}

pub fn delete_account(session: &Session, account: &str, token: Option<&str>) -> Result<ExitCode> {
    let client = session.client()?;
    match token {
        Some(token) => call(&Endpoint::DeleteAccountToken.name(), || {
            client.delete_account_token(account, token)
        }),
        None => call(&Endpoint::DeleteAccountAllTokens.name(), || client.delete_account(account)),
    }
}
