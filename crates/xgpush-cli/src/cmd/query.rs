use std::process::ExitCode;

use anyhow::Result;

use xgpush_client::Endpoint;

use super::{call, Session};

pub fn status(session: &Session, push_ids: &[String]) -> Result<ExitCode> {
    let client = session.client()?;
    call(&Endpoint::QueryPushStatus.name(), || client.query_push_status(push_ids))
}

pub fn tags(session: &Session, start: u32, limit: u32) -> Result<ExitCode> {
    let client = session.client()?;
    call(&Endpoint::QueryTags.name(), || client.query_tags(start, limit))
}

pub fn device_count(session: &Session) -> Result<ExitCode> {
    let client = session.client()?;
    call(&Endpoint::QueryDeviceCount.name(), || client.query_device_count())
}

pub fn token_tags(session: &Session, token: &str) -> Result<ExitCode> {
    let client = session.client()?;
    call(&Endpoint::QueryTokenTags.name(), || client.query_token_tags(token))
}

pub fn tag_count(session: &Session, tag: &str) -> Result<ExitCode> {
    let client = session.client()?;
    call(&Endpoint::QueryTagTokenNum.name(), || client.query_tag_token_num(tag))
}
