//! Endpoint catalogue.
//!
//! Keep paths stable: they participate in every request signature.

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "http://openapi.xg.qq.com/v2";

/// Every REST endpoint the client can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    PushSingleDevice,
    PushSingleAccount,
    PushAccountList,
    PushAllDevice,
    PushTags,
    QueryPushStatus,
    QueryDeviceCount,
    QueryTags,
    CancelTimingPush,
    BatchSetTag,
    BatchDelTag,
    QueryTokenTags,
    QueryTagTokenNum,
    DeleteAccountToken,
    DeleteAccountAllTokens,
}

impl Endpoint {
    pub const ALL: [Endpoint; 15] = [
        Endpoint::PushSingleDevice,
        Endpoint::PushSingleAccount,
        Endpoint::PushAccountList,
        Endpoint::PushAllDevice,
        Endpoint::PushTags,
        Endpoint::QueryPushStatus,
        Endpoint::QueryDeviceCount,
        Endpoint::QueryTags,
        Endpoint::CancelTimingPush,
        Endpoint::BatchSetTag,
        Endpoint::BatchDelTag,
        Endpoint::QueryTokenTags,
        Endpoint::QueryTagTokenNum,
        Endpoint::DeleteAccountToken,
        Endpoint::DeleteAccountAllTokens,
    ];

    /// Path below the API root, starting with `/`.
    pub fn path(&self) -> &'static str {
        match self {
            Self::PushSingleDevice => "/push/single_device",
            Self::PushSingleAccount => "/push/single_account",
            Self::PushAccountList => "/push/account_list",
            Self::PushAllDevice => "/push/all_device",
            Self::PushTags => "/push/tags_device",
            Self::QueryPushStatus => "/push/get_msg_status",
            Self::QueryDeviceCount => "/application/get_app_device_num",
            Self::QueryTags => "/tags/query_app_tags",
            Self::CancelTimingPush => "/push/cancel_timing_task",
            Self::BatchSetTag => "/tags/batch_set",
            Self::BatchDelTag => "/tags/batch_del",
            Self::QueryTokenTags => "/tags/query_token_tags",
            Self::QueryTagTokenNum => "/tags/query_tag_token_num",
            Self::DeleteAccountToken => "/application/del_app_account_tokens",
            Self::DeleteAccountAllTokens => "/application/del_app_account_all_tokens",
        }
    }

    /// Full URL under `base_url`. A trailing `/` on the base is ignored.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }

    /// Short dotted name used in logs and CLI output (e.g. `push.single_device`).
    pub fn name(&self) -> String {
        self.path().trim_start_matches('/').replace('/', ".")
    }
}
