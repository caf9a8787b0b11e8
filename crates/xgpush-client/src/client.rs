//! Per-endpoint façade.
//!
//! Each method shapes its arguments into a [`ParamSet`] and hands it to the
//! core dispatcher. Argument problems fail fast with
//! [`XgError::InvalidArgument`]; everything after signing comes back as a
//! [`ResponseEnvelope`].

use serde_json::json;
use xgpush_core::clock::{Clock, SystemClock};
use xgpush_core::credentials::Credentials;
use xgpush_core::dispatch::Dispatcher;
use xgpush_core::envelope::ResponseEnvelope;
use xgpush_core::params::ParamSet;
use xgpush_core::request::SignedRequest;
use xgpush_core::transport::HttpTransport;
use xgpush_core::{XgError, XgResult};

use crate::config::{validate_config, ClientConfig};
use crate::endpoint::{Endpoint, DEFAULT_BASE_URL};
use crate::error::ClientResult;
use crate::http::ReqwestTransport;
use crate::message::{Platform, PushMessage, TagOperation};

/// Default page used by [`PushClient::query_tags_default`].
pub const DEFAULT_TAG_PAGE: (u32, u32) = (0, 100);

/// Client for one application (one set of credentials).
#[derive(Debug, Clone)]
pub struct PushClient<T = ReqwestTransport, C = SystemClock> {
    credentials: Credentials,
    base_url: String,
    dispatcher: Dispatcher<T, C>,
}

impl PushClient<ReqwestTransport, SystemClock> {
    /// Client against the production API with default settings.
    pub fn new(credentials: Credentials) -> ClientResult<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    pub fn with_config(credentials: Credentials, config: ClientConfig) -> ClientResult<Self> {
        validate_config(&config)?;
        let transport = ReqwestTransport::new(&config.transport)?
            .with_body_limit(config.dispatch.max_response_bytes);
        let dispatcher = Dispatcher::new(transport).with_config(config.dispatch)?;
        Ok(Self {
            credentials,
            base_url: config.base_url,
            dispatcher,
        })
    }
}

impl<T: HttpTransport> PushClient<T, SystemClock> {
    /// Client over a caller-provided transport, against the production API.
    pub fn with_transport(credentials: Credentials, transport: T) -> Self {
        Self::from_parts(credentials, DEFAULT_BASE_URL, Dispatcher::new(transport))
    }
}

impl<T: HttpTransport, C: Clock> PushClient<T, C> {
    pub fn from_parts(credentials: Credentials, base_url: impl Into<String>, dispatcher: Dispatcher<T, C>) -> Self {
        Self {
            credentials,
            base_url: base_url.into(),
            dispatcher,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        endpoint.url(&self.base_url)
    }

    /// Sign and send arbitrary parameters to an endpoint.
    pub fn call(&self, endpoint: Endpoint, params: ParamSet) -> XgResult<ResponseEnvelope> {
        let url = self.endpoint_url(endpoint);
        tracing::debug!(endpoint = %endpoint.name(), fields = params.len(), "calling endpoint");
        self.dispatcher.send(&url, params, &self.credentials)
    }

    /// Stamp and sign without sending.
    pub fn prepare(&self, endpoint: Endpoint, params: ParamSet) -> XgResult<SignedRequest> {
        self.dispatcher
            .prepare(&self.endpoint_url(endpoint), params, &self.credentials)
    }

    /// Push to one device token.
    pub fn push_single_device(
        &self,
        device_token: &str,
        message: &PushMessage,
        platform: Platform,
    ) -> XgResult<ResponseEnvelope> {
        let mut p = ParamSet::new();
        p.set("device_token", required("device_token", device_token)?)?;
        message.apply(&mut p)?;
        platform.apply(&mut p)?;
        self.call(Endpoint::PushSingleDevice, p)
    }

    /// Push to every device bound to one account.
    pub fn push_single_account(
        &self,
        account: &str,
        message: &PushMessage,
        platform: Platform,
    ) -> XgResult<ResponseEnvelope> {
        let mut p = ParamSet::new();
        p.set("account", required("account", account)?)?;
        message.apply(&mut p)?;
        platform.apply(&mut p)?;
        self.call(Endpoint::PushSingleAccount, p)
    }

    /// Push to several accounts at once.
    pub fn push_account_list<S: AsRef<str>>(
        &self,
        accounts: &[S],
        message: &PushMessage,
        platform: Platform,
    ) -> XgResult<ResponseEnvelope> {
        let accounts = required_list("account_list", accounts)?;
        let mut p = ParamSet::new();
        p.set_json("account_list", &accounts)?;
        message.apply(&mut p)?;
        platform.apply(&mut p)?;
        self.call(Endpoint::PushAccountList, p)
    }

    /// Broadcast to every device of the application.
    pub fn push_all_devices(&self, message: &PushMessage, platform: Platform) -> XgResult<ResponseEnvelope> {
        let mut p = ParamSet::new();
        message.apply(&mut p)?;
        message.apply_loop(&mut p)?;
        platform.apply(&mut p)?;
        self.call(Endpoint::PushAllDevice, p)
    }

    /// Push to devices matching a tag expression.
    pub fn push_tags<S: AsRef<str>>(
        &self,
        tags: &[S],
        op: TagOperation,
        message: &PushMessage,
        platform: Platform,
    ) -> XgResult<ResponseEnvelope> {
        let tags = required_list("tags_list", tags)?;
        let mut p = ParamSet::new();
        p.set_json("tags_list", &tags)?;
        p.set_display("tags_op", op)?;
        message.apply(&mut p)?;
        message.apply_loop(&mut p)?;
        platform.apply(&mut p)?;
        self.call(Endpoint::PushTags, p)
    }

    /// Delivery status of broadcast pushes.
    pub fn query_push_status<S: AsRef<str>>(&self, push_ids: &[S]) -> XgResult<ResponseEnvelope> {
        let ids = required_list("push_ids", push_ids)?;
        let body: Vec<_> = ids.iter().map(|id| json!({ "push_id": id })).collect();
        let mut p = ParamSet::new();
        p.set_json("push_ids", &body)?;
        self.call(Endpoint::QueryPushStatus, p)
    }

    /// Number of devices registered for the application.
    pub fn query_device_count(&self) -> XgResult<ResponseEnvelope> {
        self.call(Endpoint::QueryDeviceCount, ParamSet::new())
    }

    /// One page of the application's tags.
    pub fn query_tags(&self, start: u32, limit: u32) -> XgResult<ResponseEnvelope> {
        let mut p = ParamSet::new();
        p.set_display("start", start)?;
        p.set_display("limit", limit)?;
        self.call(Endpoint::QueryTags, p)
    }

    pub fn query_tags_default(&self) -> XgResult<ResponseEnvelope> {
        self.query_tags(DEFAULT_TAG_PAGE.0, DEFAULT_TAG_PAGE.1)
    }

    /// Cancel a scheduled broadcast that has not fired yet.
    pub fn cancel_timing_push(&self, push_id: &str) -> XgResult<ResponseEnvelope> {
        let mut p = ParamSet::new();
        p.set("push_id", required("push_id", push_id)?)?;
        self.call(Endpoint::CancelTimingPush, p)
    }

    /// Attach tags to tokens; each pair is `(tag, device_token)`.
    pub fn batch_set_tag<S: AsRef<str>>(&self, pairs: &[(S, S)]) -> XgResult<ResponseEnvelope> {
        let mut p = ParamSet::new();
        p.set_json("tag_token_list", &tag_token_list(pairs)?)?;
        self.call(Endpoint::BatchSetTag, p)
    }

    /// Detach tags from tokens; each pair is `(tag, device_token)`.
    pub fn batch_del_tag<S: AsRef<str>>(&self, pairs: &[(S, S)]) -> XgResult<ResponseEnvelope> {
        let mut p = ParamSet::new();
        p.set_json("tag_token_list", &tag_token_list(pairs)?)?;
        self.call(Endpoint::BatchDelTag, p)
    }

    /// Tags currently set on one token.
    pub fn query_token_tags(&self, device_token: &str) -> XgResult<ResponseEnvelope> {
        let mut p = ParamSet::new();
        p.set("device_token", required("device_token", device_token)?)?;
        self.call(Endpoint::QueryTokenTags, p)
    }

    /// Number of tokens carrying one tag.
    pub fn query_tag_token_num(&self, tag: &str) -> XgResult<ResponseEnvelope> {
        let mut p = ParamSet::new();
        p.set("tag", required("tag", tag)?)?;
        self.call(Endpoint::QueryTagTokenNum, p)
    }

    /// Unbind one token from an account.
    pub fn delete_account_token(&self, account: &str, device_token: &str) -> XgResult<ResponseEnvelope> {
        let mut p = ParamSet::new();
        p.set("account", required("account", account)?)?;
        p.set("device_token", required("device_token", device_token)?)?;
        self.call(Endpoint::DeleteAccountToken, p)
    }

    /// Unbind every token from an account.
    pub fn delete_account(&self, account: &str) -> XgResult<ResponseEnvelope> {
        let mut p = ParamSet::new();
        p.set("account", required("account", account)?)?;
        self.call(Endpoint::DeleteAccountAllTokens, p)
    }
}

fn required<'a>(name: &str, value: &'a str) -> XgResult<&'a str> {
    if value.trim().is_empty() {
        return Err(XgError::invalid_argument(format!("{name} must not be empty")));
    }
    Ok(value)
}

fn required_list<'a, S: AsRef<str>>(name: &str, items: &'a [S]) -> XgResult<Vec<&'a str>> {
    if items.is_empty() {
        return Err(XgError::invalid_argument(format!("{name} must not be empty")));
    }
    items.iter().map(|s| required(name, s.as_ref())).collect()
}

fn tag_token_list<S: AsRef<str>>(pairs: &[(S, S)]) -> XgResult<Vec<[&str; 2]>> {
    if pairs.is_empty() {
        return Err(XgError::invalid_argument("tag_token_list must not be empty"));
    }
    pairs
        .iter()
        .map(|(tag, token)| -> XgResult<[&str; 2]> {
            Ok([required("tag", tag.as_ref())?, required("device_token", token.as_ref())?])
        })
        .collect()
}
