//! Push parameters shared by the push endpoints.
//!
//! The notification body itself is opaque here: callers hand over the
//! platform-specific message already serialized to JSON, and this module
//! only places it (and the scheduling knobs around it) into a [`ParamSet`].

use std::fmt;

use serde_json::Value;
use xgpush_core::params::ParamSet;
use xgpush_core::{XgError, XgResult};

/// Android message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    /// Shown in the notification bar.
    Notification,
    /// Delivered to the app without UI ("passthrough").
    Passthrough,
}

impl MessageType {
    pub fn code(&self) -> u32 {
        match self {
            Self::Notification => 1,
            Self::Passthrough => 2,
        }
    }
}

/// APNs environment for iOS pushes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IosEnvironment {
    Production,
    Development,
}

impl IosEnvironment {
    pub fn code(&self) -> u32 {
        match self {
            Self::Production => 1,
            Self::Development => 2,
        }
    }
}

/// Target platform and its platform-only parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android { multi_pkg: bool },
    Ios { environment: IosEnvironment },
}

impl Platform {
    pub(crate) fn apply(&self, params: &mut ParamSet) -> XgResult<()> {
        match self {
            Self::Android { multi_pkg } => params.set("multi_pkg", if *multi_pkg { "1" } else { "0" }),
            Self::Ios { environment } => params.set_display("environment", environment.code()),
        }
    }
}

/// Boolean combinator for tag pushes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOperation {
    And,
    Or,
}

impl fmt::Display for TagOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("AND"),
            Self::Or => f.write_str("OR"),
        }
    }
}

/// A message plus the delivery options that accompany it on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushMessage {
    /// Platform message, already serialized as a JSON object.
    pub payload: String,
    pub message_type: MessageType,
    /// Scheduled send time, `YYYY-MM-DD hh:mm:ss`. Immediate when absent.
    pub send_time: Option<String>,
    /// Seconds the server keeps the message for offline devices.
    pub expire_time: Option<u32>,
    /// Repeat count for scheduled broadcast pushes.
    pub loop_times: Option<u32>,
    /// Days between repeats for scheduled broadcast pushes.
    pub loop_interval: Option<u32>,
}

impl PushMessage {
    pub fn new(payload: impl Into<String>, message_type: MessageType) -> Self {
        Self {
            payload: payload.into(),
            message_type,
            send_time: None,
            expire_time: None,
            loop_times: None,
            loop_interval: None,
        }
    }

    pub fn with_send_time(mut self, send_time: impl Into<String>) -> Self {
        self.send_time = Some(send_time.into());
        self
    }

    pub fn with_expire_time(mut self, seconds: u32) -> Self {
        self.expire_time = Some(seconds);
        self
    }

    pub fn with_loop(mut self, times: u32, interval_days: u32) -> Self {
        self.loop_times = Some(times);
        self.loop_interval = Some(interval_days);
        self
    }

    /// Payload must be a JSON object.
    pub fn validate(&self) -> XgResult<()> {
        match serde_json::from_str::<Value>(&self.payload) {
            Ok(Value::Object(_)) => Ok(()),
            Ok(_) => Err(XgError::invalid_argument("message payload must be a JSON object")),
            Err(e) => Err(XgError::invalid_argument(format!(
                "message payload is not valid JSON: {e}"
            ))),
        }
    }

    /// Fields common to every push endpoint.
    pub(crate) fn apply(&self, params: &mut ParamSet) -> XgResult<()> {
        self.validate()?;
        params.set("message", self.payload.as_str())?;
        params.set_display("message_type", self.message_type.code())?;
        if let Some(t) = &self.send_time {
            params.set("send_time", t.as_str())?;
        }
        if let Some(e) = self.expire_time {
            params.set_display("expire_time", e)?;
        }
        Ok(())
    }

    /// Repeat options, honored only by broadcast endpoints (all devices, tags).
    pub(crate) fn apply_loop(&self, params: &mut ParamSet) -> XgResult<()> {
        if let Some(n) = self.loop_times {
            params.set_display("loop_times", n)?;
        }
        if let Some(d) = self.loop_interval {
            params.set_display("loop_interval", d)?;
        }
        Ok(())
    }
}
