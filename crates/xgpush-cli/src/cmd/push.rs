use std::process::ExitCode;

use anyhow::Result;

use xgpush_client::{Endpoint, IosEnvironment, MessageType, Platform, PushMessage, TagOperation};

use super::{call, Session};
use crate::args::{IosEnvArg, MessageArgs, PlatformArgs, TagOpArg};
use crate::io::input::read_payload;

fn message(args: &MessageArgs) -> Result<PushMessage> {
    let kind = if args.passthrough {
        MessageType::Passthrough
    } else {
        MessageType::Notification
    };
    let mut msg = PushMessage::new(read_payload(&args.message)?, kind);
    if let Some(t) = &args.send_time {
        msg = msg.with_send_time(t.clone());
    }
    if let Some(secs) = args.expire_time {
        msg = msg.with_expire_time(secs);
    }
    if let (Some(times), Some(interval)) = (args.loop_times, args.loop_interval) {
        msg = msg.with_loop(times, interval);
    }
    Ok(msg)
}

fn platform(args: &PlatformArgs) -> Platform {
    match args.ios {
        Some(IosEnvArg::Prod) => Platform::Ios { environment: IosEnvironment::Production },
        Some(IosEnvArg::Dev) => Platform::Ios { environment: IosEnvironment::Development },
        None => Platform::Android { multi_pkg: args.multi_pkg },
    }
}

pub fn device(session: &Session, token: &str, m: &MessageArgs, p: &PlatformArgs) -> Result<ExitCode> {
    let client = session.client()?;
    let msg = message(m)?;
    call(&Endpoint::PushSingleDevice.name(), || {
        client.push_single_device(token, &msg, platform(p))
    })
}

pub fn account(session: &Session, account: &str, m: &MessageArgs, p: &PlatformArgs) -> Result<ExitCode> {
    let client = session.client()?;
    let msg = message(m)?;
    call(&Endpoint::PushSingleAccount.name(), || {
        client.push_single_account(account, &msg, platform(p))
    })
}

pub fn accounts(session: &Session, accounts: &[String], m: &MessageArgs, p: &PlatformArgs) -> Result<ExitCode> {
    let client = session.client()?;
    let msg = message(m)?;
    call(&Endpoint::PushAccountList.name(), || {
        client.push_account_list(accounts, &msg, platform(p))
    })
}

pub fn all(session: &Session, m: &MessageArgs, p: &PlatformArgs) -> Result<ExitCode> {
    let client = session.client()?;
    let msg = message(m)?;
    call(&Endpoint::PushAllDevice.name(), || client.push_all_devices(&msg, platform(p)))
}

pub fn tags(
    session: &Session,
    tags: &[String],
    op: TagOpArg,
    m: &MessageArgs,
    p: &PlatformArgs,
) -> Result<ExitCode> {
    let client = session.client()?;
    let msg = message(m)?;
    let op = match op {
        TagOpArg::And => TagOperation::And,
        TagOpArg::Or => TagOperation::Or,
    };
    call(&Endpoint::PushTags.name(), || client.push_tags(tags, op, &msg, platform(p)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn margs(message: &str) -> MessageArgs {
        MessageArgs {
            message: message.to_string(),
            passthrough: true,
            send_time: None,
            expire_time: Some(60),
            loop_times: Some(2),
            loop_interval: Some(1),
        }
    }

    #[test]
    fn message_args_map_onto_push_message() {
        let msg = message(&margs(r#"{"content":"x"}"#)).unwrap();
        assert_eq!(msg.payload, r#"{"content":"x"}"#);
        assert_eq!(msg.message_type, MessageType::Passthrough);
        assert_eq!(msg.expire_time, Some(60));
        assert_eq!(msg.loop_times, Some(2));
        assert_eq!(msg.loop_interval, Some(1));
        assert_eq!(msg.send_time, None);
    }

    #[test]
    fn platform_defaults_to_android() {
        let p = PlatformArgs { ios: None, multi_pkg: true };
        assert_eq!(platform(&p), Platform::Android { multi_pkg: true });
        let p = PlatformArgs { ios: Some(IosEnvArg::Dev), multi_pkg: false };
        assert_eq!(platform(&p), Platform::Ios { environment: IosEnvironment::Development });
    }
}
