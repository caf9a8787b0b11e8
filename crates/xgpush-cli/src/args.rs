use clap::{Args, Parser, Subcommand, ValueEnum};

use xgpush_client::DEFAULT_BASE_URL;

#[derive(Parser, Debug, Clone)]
#[command(name = "xgpush", version, about = "XG push REST API client")]
pub struct Cli {
    /// Emit JSON output on stdout (and JSON logs on stderr).
    #[arg(long, global = true)]
    pub json: bool,

    /// Log request details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Application access id.
    #[arg(long, global = true, env = "XG_ACCESS_ID")]
    pub access_id: Option<String>,

    /// Application secret key.
    #[arg(long, global = true, env = "XG_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Request validity window in seconds (1..=600; anything else means 600).
    #[arg(long, global = true, default_value_t = 600)]
    pub valid_time: u32,

    /// API root.
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Whole-request timeout in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Stamp and sign a field set without sending it.
    Sign {
        /// Endpoint URL the signature is bound to.
        #[arg(long)]
        url: String,
        /// Unix seconds to stamp (default: now).
        #[arg(long)]
        timestamp: Option<i64>,
        /// Compare the computed signature with this one.
        #[arg(long)]
        check: Option<String>,
        /// Fields as key=value.
        params: Vec<String>,
    },

    /// Sign and send raw fields to an endpoint.
    Send {
        /// Endpoint name (e.g. push.single_device) or absolute URL.
        target: String,
        /// Fields as key=value.
        params: Vec<String>,
    },

    /// Push to one device token.
    PushDevice {
        token: String,
        #[command(flatten)]
        message: MessageArgs,
        #[command(flatten)]
        platform: PlatformArgs,
    },

    /// Push to one account.
    PushAccount {
        account: String,
        #[command(flatten)]
        message: MessageArgs,
        #[command(flatten)]
        platform: PlatformArgs,
    },

    /// Push to several accounts.
    PushAccounts {
        #[arg(required = true)]
        accounts: Vec<String>,
        #[command(flatten)]
        message: MessageArgs,
        #[command(flatten)]
        platform: PlatformArgs,
    },

    /// Broadcast to every device.
    PushAll {
        #[command(flatten)]
        message: MessageArgs,
        #[command(flatten)]
        platform: PlatformArgs,
    },

    /// Push to devices matching tags.
    PushTags {
        /// Tag to match (repeatable).
        #[arg(long = "tag", required = true)]
        tags: Vec<String>,
        #[arg(long, value_enum, default_value_t = TagOpArg::Or)]
        op: TagOpArg,
        #[command(flatten)]
        message: MessageArgs,
        #[command(flatten)]
        platform: PlatformArgs,
    },

    /// Delivery status of broadcast pushes.
    QueryStatus {
        #[arg(required = true)]
        push_ids: Vec<String>,
    },

    /// List application tags.
    QueryTags {
        #[arg(long, default_value_t = 0)]
        start: u32,
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },

    /// Number of registered devices.
    QueryDeviceCount,

    /// Tags set on one token.
    QueryTokenTags { token: String },

    /// Number of tokens carrying a tag.
    QueryTagCount { tag: String },

    /// Cancel a scheduled broadcast.
    CancelPush { push_id: String },

    /// Set tags on tokens; each pair is TAG=TOKEN.
    SetTags {
        #[arg(required = true)]
        pairs: Vec<String>,
    },

    /// Remove tags from tokens; each pair is TAG=TOKEN.
    DelTags {
        #[arg(required = true)]
        pairs: Vec<String>,
    },

    /// Unbind tokens from an account (all of them unless --token is given).
    DeleteAccount {
        account: String,
        #[arg(long)]
        token: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct MessageArgs {
    /// Message JSON, or @path to read it from a file.
    #[arg(long)]
    pub message: String,
    /// Send as a passthrough message instead of a notification.
    #[arg(long)]
    pub passthrough: bool,
    /// Scheduled send time, "YYYY-MM-DD hh:mm:ss".
    #[arg(long)]
    pub send_time: Option<String>,
    /// Offline retention in seconds.
    #[arg(long)]
    pub expire_time: Option<u32>,
    /// Repeat count (broadcast pushes only).
    #[arg(long, requires = "loop_interval")]
    pub loop_times: Option<u32>,
    /// Days between repeats (broadcast pushes only).
    #[arg(long, requires = "loop_times")]
    pub loop_interval: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct PlatformArgs {
    /// Target iOS in the given APNs environment (default: Android).
    #[arg(long, value_enum)]
    pub ios: Option<IosEnvArg>,
    /// Android: deliver to every package sharing the access id.
    #[arg(long, conflicts_with = "ios")]
    pub multi_pkg: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IosEnvArg {
    Prod,
    Dev,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOpArg {
    And,
    Or,
}
