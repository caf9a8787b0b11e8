//! pipeline_contract.rs
//!
//! Black-box checks of the signing + dispatch contract through the public API:
//! what reaches the transport, how it is signed, and how concurrent callers
//! sharing one credentials value stay independent.

use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use std::thread;

use xgpush_core::prelude::*;

/// Records every POST and answers with a fixed body.
struct Recorder {
    body: Vec<u8>,
    seen: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl Recorder {
    fn answering(body: &str) -> Self {
        Self {
            body: body.as_bytes().to_vec(),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.seen.lock().unwrap().clone()
    }
}

impl HttpTransport for Recorder {
    fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<Vec<u8>, TransportError> {
        let owned = fields.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        self.seen.lock().unwrap().push((url.to_string(), owned));
        Ok(self.body.clone())
    }
}

/// Each read returns a new second.
struct TickingClock(AtomicI64);

impl Clock for TickingClock {
    fn now_unix_seconds(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

fn split_sign(pairs: &[(String, String)]) -> (ParamSet, String) {
    let (last_key, sign) = pairs.last().expect("at least the sign field");
    assert_eq!(last_key, "sign");
    let fields = ParamSet::try_from_pairs(pairs[..pairs.len() - 1].iter().cloned()).unwrap();
    (fields, sign.clone())
}

#[test]
fn wire_fields_match_anchor() {
    let rec = Recorder::answering(r#"{"ret_code":0,"err_msg":""}"#);
    let d = Dispatcher::with_clock(&rec, FixedClock::new(1000));
    let creds = Credentials::new("1", "abc").unwrap();

    let env = d.send("http://example/push", ParamSet::new(), &creds).unwrap();
    assert!(env.is_success());

    let reqs = rec.requests();
    assert_eq!(reqs.len(), 1);
    let (url, pairs) = &reqs[0];
    assert_eq!(url, "http://example/push");
    let expected: Vec<(String, String)> = [
        ("access_id", "1"),
        ("timestamp", "1000"),
        ("valid_time", "600"),
        ("sign", "353ccd766396d56564e9d6141d5e56be"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(pairs, &expected);
}

#[test]
fn caller_fields_are_signed_and_sent() {
    let rec = Recorder::answering(r#"{"ret_code":0}"#);
    let d = Dispatcher::with_clock(&rec, FixedClock::new(1_700_000_000));
    let creds = Credentials::new("2100000001", "s3cr3t").unwrap().with_valid_time(120);

    let mut params = ParamSet::new();
    params.set("device_token", "tok").unwrap();
    params.set("message", r#"{"title":"hi","content":"x=y&z"}"#).unwrap();
    params.set("message_type", "1").unwrap();

    d.send("http://openapi.xg.qq.com/v2/push/single_device", params, &creds).unwrap();

    let reqs = rec.requests();
    let (url, pairs) = &reqs[0];
    let (fields, sign) = split_sign(pairs);
    assert_eq!(fields.get("valid_time"), Some("120"));
    assert_eq!(fields.get("message"), Some(r#"{"title":"hi","content":"x=y&z"}"#));
    assert!(verify_signature(url, &fields, "s3cr3t", &sign));
}

#[test]
fn same_fields_same_signature() {
    let creds = Credentials::new("1", "abc").unwrap();
    let d = Dispatcher::with_clock(NoNetworkTransport, FixedClock::new(5000));
    let p = ParamSet::try_from_pairs([("b", "2"), ("a", "1")]).unwrap();
    let r1 = d.prepare("http://example/push", p.clone(), &creds).unwrap();
    let r2 = d.prepare("http://example/push", p, &creds).unwrap();
    assert_eq!(r1.sign(), r2.sign());
    assert_eq!(r1, r2);
}

#[test]
fn single_value_mutation_changes_signature() {
    let creds = Credentials::new("1", "abc").unwrap();
    let d = Dispatcher::with_clock(NoNetworkTransport, FixedClock::new(5000));
    let base = d
        .prepare("http://example/push", ParamSet::try_from_pairs([("tag", "a")]).unwrap(), &creds)
        .unwrap();
    let changed = d
        .prepare("http://example/push", ParamSet::try_from_pairs([("tag", "b")]).unwrap(), &creds)
        .unwrap();
    assert_ne!(base.sign(), changed.sign());
}

#[test]
fn transport_failure_is_data() {
    let creds = Credentials::new("1", "abc").unwrap();
    let d = Dispatcher::new(NoNetworkTransport);
    let env = d.send("http://example/push", ParamSet::new(), &creds).unwrap();
    assert_eq!(env.ret_code, -1);
    assert!(!env.err_msg.is_empty());
    assert_eq!(env.outcome(), Outcome::LocalFailure);
}

#[test]
fn concurrent_calls_get_independent_timestamps() {
    let rec = Recorder::answering(r#"{"ret_code":0}"#);
    let d = Dispatcher::with_clock(&rec, TickingClock(AtomicI64::new(1_000_000)));
    let creds = Credentials::new("1", "abc").unwrap();

    thread::scope(|s| {
        for t in 0..8 {
            let d = &d;
            let creds = &creds;
            s.spawn(move || {
                for i in 0..10 {
                    let p = ParamSet::try_from_pairs([("n", format!("{t}-{i}"))]).unwrap();
                    let env = d.send("http://example/push", p, creds).unwrap();
                    assert!(env.is_success());
                }
            });
        }
    });

    let reqs = rec.requests();
    assert_eq!(reqs.len(), 80);

    let mut stamps = HashSet::new();
    for (url, pairs) in &reqs {
        let (fields, sign) = split_sign(pairs);
        assert!(verify_signature(url, &fields, "abc", &sign));
        let ts: i64 = fields.get("timestamp").unwrap().parse().unwrap();
        assert!(stamps.insert(ts), "timestamp {ts} reused across calls");
    }
}
