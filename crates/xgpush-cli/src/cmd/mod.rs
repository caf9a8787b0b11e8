use std::process::ExitCode;

use anyhow::{anyhow, Result};

use xgpush_client::{
    ClientConfig, Credentials, Outcome, PushClient, ResponseEnvelope, TransportConfig,
};

use crate::args::{Cli, Command};
use crate::output;

mod manage;
mod push;
mod query;
mod send;
mod sign;

pub fn dispatch(cli: Cli) -> Result<ExitCode> {
    let session = Session::from_cli(&cli);
    match cli.command {
        Command::Sign { url, timestamp, check, params } => {
            sign::run(&session, &url, timestamp, check.as_deref(), &params)
        }
        Command::Send { target, params } => send::run(&session, &target, &params),
        Command::PushDevice { token, message, platform } => {
            push::device(&session, &token, &message, &platform)
        }
        Command::PushAccount { account, message, platform } => {
            push::account(&session, &account, &message, &platform)
        }
        Command::PushAccounts { accounts, message, platform } => {
            push::accounts(&session, &accounts, &message, &platform)
        }
        Command::PushAll { message, platform } => push::all(&session, &message, &platform),
        Command::PushTags { tags, op, message, platform } => {
            push::tags(&session, &tags, op, &message, &platform)
        }
        Command::QueryStatus { push_ids } => query::status(&session, &push_ids),
        Command::QueryTags { start, limit } => query::tags(&session, start, limit),
        Command::QueryDeviceCount => query::device_count(&session),
        Command::QueryTokenTags { token } => query::token_tags(&session, &token),
        Command::QueryTagCount { tag } => query::tag_count(&session, &tag),
        Command::CancelPush { push_id } => manage::cancel(&session, &push_id),
        Command::SetTags { pairs } => manage::set_tags(&session, &pairs),
        Command::DelTags { pairs } => manage::del_tags(&session, &pairs),
        Command::DeleteAccount { account, token } => {
            manage::delete_account(&session, &account, token.as_deref())
        }
    }
}

/// Global flags resolved into the pieces every command needs.
pub struct Session {
    access_id: Option<String>,
    secret_key: Option<String>,
    valid_time: u32,
    config: ClientConfig,
}

impl Session {
    fn from_cli(cli: &Cli) -> Self {
        let defaults = TransportConfig::default();
        let transport = TransportConfig {
            timeout_ms: cli.timeout_ms,
            connect_timeout_ms: defaults.connect_timeout_ms.min(cli.timeout_ms),
            ..defaults
        };
        Self {
            access_id: cli.access_id.clone(),
            secret_key: cli.secret_key.clone(),
            valid_time: cli.valid_time,
            config: ClientConfig {
                base_url: cli.base_url.clone(),
                transport,
                ..ClientConfig::default()
            },
        }
    }

    pub fn credentials(&self) -> Result<Credentials> {
        let access_id = self
            .access_id
            .as_deref()
            .ok_or_else(|| anyhow!("missing access id (--access-id or XG_ACCESS_ID)"))?;
        let secret_key = self
            .secret_key
            .as_deref()
            .ok_or_else(|| anyhow!("missing secret key (--secret-key or XG_SECRET_KEY)"))?;
        Ok(Credentials::new(access_id, secret_key)?.with_valid_time(self.valid_time))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn client(&self) -> Result<PushClient> {
        Ok(PushClient::with_config(self.credentials()?, self.config.clone())?)
    }
}

/// Run one network call under a spinner, print its envelope, map it to an exit code.
pub fn call(
    label: &str,
    f: impl FnOnce() -> xgpush_core::XgResult<ResponseEnvelope>,
) -> Result<ExitCode> {
    let pb = output::spinner(format!("calling {label}"));
    let res = f();
    pb.finish_and_clear();

    let env = res?;
    tracing::debug!(endpoint = label, ret_code = env.ret_code, "call finished");
    output::print_envelope(label, &env)?;
    Ok(ExitCode::from(exit_status(&env)))
}

/// The server answered with a nonzero `ret_code` (or `sign --check` mismatched).
pub const REJECTED: u8 = 1;
/// The request was sent but failed on this side (transport, decoding).
pub const LOCAL_FAILURE: u8 = 2;
/// Nothing was sent: bad usage, bad arguments, missing credentials.
pub const USAGE_ERROR: u8 = 3;

pub fn exit_status(env: &ResponseEnvelope) -> u8 {
    match env.outcome() {
        Outcome::Success => 0,
        Outcome::RemoteRejection => REJECTED,
        Outcome::LocalFailure => LOCAL_FAILURE,
    }
}
