//! facade_requests.rs
//!
//! Checks what each façade method actually puts on the wire, using a
//! transport that records requests instead of sending them.

use std::sync::Mutex;

use serde_json::{json, Value};
use xgpush_client::{
    Credentials, Endpoint, IosEnvironment, MessageType, ParamSet, Platform, PushClient, PushMessage,
    TagOperation,
};
use xgpush_core::clock::FixedClock;
use xgpush_core::dispatch::Dispatcher;
use xgpush_core::signature::verify_signature;
use xgpush_core::transport::{HttpTransport, TransportError};

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl HttpTransport for Recorder {
    fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<Vec<u8>, TransportError> {
        let owned = fields.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        self.seen.lock().unwrap().push((url.to_string(), owned));
        Ok(br#"{"ret_code":0,"err_msg":"","result":{"push_id":"42"}}"#.to_vec())
    }
}

impl Recorder {
    /// The single recorded request as (url, fields without sign); asserts the signature.
    fn only(&self) -> (String, ParamSet) {
        let seen = self.seen.lock().unwrap();
        assert_eq!(seen.len(), 1, "expected exactly one request");
        let (url, pairs) = seen[0].clone();
        let (last, sign) = pairs.last().cloned().unwrap();
        assert_eq!(last, "sign");
        let fields = ParamSet::try_from_pairs(pairs[..pairs.len() - 1].iter().cloned()).unwrap();
        assert!(verify_signature(&url, &fields, "secret", &sign));
        (url, fields)
    }
}

fn client(rec: &Recorder) -> PushClient<&Recorder, FixedClock> {
    let creds = Credentials::new("2100000001", "secret").unwrap();
    PushClient::from_parts(
        creds,
        "http://push.test/v2",
        Dispatcher::with_clock(rec, FixedClock::new(1_760_000_000)),
    )
}

fn json_field(fields: &ParamSet, key: &str) -> Value {
    serde_json::from_str(fields.get(key).unwrap()).unwrap()
}

fn msg() -> PushMessage {
    PushMessage::new(r#"{"title":"hello","content":"world"}"#, MessageType::Notification)
}

#[test]
fn single_device_android() {
    let rec = Recorder::default();
    let env = client(&rec)
        .push_single_device("token-1", &msg().with_expire_time(86400), Platform::Android { multi_pkg: true })
        .unwrap();
    assert!(env.is_success());
    assert_eq!(env.result, Some(json!({"push_id": "42"})));

    let (url, f) = rec.only();
    assert_eq!(url, "http://push.test/v2/push/single_device");
    assert_eq!(f.get("device_token"), Some("token-1"));
    assert_eq!(f.get("message_type"), Some("1"));
    assert_eq!(f.get("expire_time"), Some("86400"));
    assert_eq!(f.get("multi_pkg"), Some("1"));
    assert!(!f.contains_key("environment"));
    assert_eq!(f.get("access_id"), Some("2100000001"));
    assert_eq!(f.get("timestamp"), Some("1760000000"));
    assert_eq!(f.get("valid_time"), Some("600"));
}

#[test]
fn single_account_ios() {
    let rec = Recorder::default();
    client(&rec)
        .push_single_account("user@example.com", &msg(), Platform::Ios { environment: IosEnvironment::Development })
        .unwrap();

    let (url, f) = rec.only();
    assert_eq!(url, "http://push.test/v2/push/single_account");
    assert_eq!(f.get("account"), Some("user@example.com"));
    assert_eq!(f.get("environment"), Some("2"));
    assert!(!f.contains_key("multi_pkg"));
}

#[test]
fn account_list_is_json_array() {
    let rec = Recorder::default();
    client(&rec)
        .push_account_list(&["a", "b", "c"], &msg(), Platform::Android { multi_pkg: false })
        .unwrap();

    let (url, f) = rec.only();
    assert_eq!(url, "http://push.test/v2/push/account_list");
    assert_eq!(json_field(&f, "account_list"), json!(["a", "b", "c"]));
    assert_eq!(f.get("multi_pkg"), Some("0"));
}

#[test]
fn all_devices_carries_loop_options() {
    let rec = Recorder::default();
    let m = msg().with_send_time("2026-10-19 09:00:00").with_loop(3, 2);
    client(&rec)
        .push_all_devices(&m, Platform::Ios { environment: IosEnvironment::Production })
        .unwrap();

    let (url, f) = rec.only();
    assert_eq!(url, "http://push.test/v2/push/all_device");
    assert_eq!(f.get("send_time"), Some("2026-10-19 09:00:00"));
    assert_eq!(f.get("loop_times"), Some("3"));
    assert_eq!(f.get("loop_interval"), Some("2"));
    assert_eq!(f.get("environment"), Some("1"));
}

#[test]
fn single_device_ignores_loop_options() {
    let rec = Recorder::default();
    client(&rec)
        .push_single_device("t", &msg().with_loop(3, 2), Platform::Android { multi_pkg: false })
        .unwrap();
    let (_, f) = rec.only();
    assert!(!f.contains_key("loop_times"));
    assert!(!f.contains_key("loop_interval"));
}

#[test]
fn tags_push() {
    let rec = Recorder::default();
    client(&rec)
        .push_tags(&["beta", "cn"], TagOperation::And, &msg(), Platform::Android { multi_pkg: false })
        .unwrap();

    let (url, f) = rec.only();
    assert_eq!(url, "http://push.test/v2/push/tags_device");
    assert_eq!(json_field(&f, "tags_list"), json!(["beta", "cn"]));
    assert_eq!(f.get("tags_op"), Some("AND"));
}

#[test]
fn push_status_ids_are_objects() {
    let rec = Recorder::default();
    client(&rec).query_push_status(&["11", "12"]).unwrap();

    let (url, f) = rec.only();
    assert_eq!(url, "http://push.test/v2/push/get_msg_status");
    assert_eq!(
        json_field(&f, "push_ids"),
        json!([{"push_id": "11"}, {"push_id": "12"}])
    );
}

#[test]
fn device_count_has_only_stamped_fields() {
    let rec = Recorder::default();
    client(&rec).query_device_count().unwrap();

    let (url, f) = rec.only();
    assert_eq!(url, "http://push.test/v2/application/get_app_device_num");
    let keys: Vec<&str> = f.sorted_pairs().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["access_id", "timestamp", "valid_time"]);
}

#[test]
fn tags_page_defaults() {
    let rec = Recorder::default();
    client(&rec).query_tags_default().unwrap();

    let (url, f) = rec.only();
    assert_eq!(url, "http://push.test/v2/tags/query_app_tags");
    assert_eq!(f.get("start"), Some("0"));
    assert_eq!(f.get("limit"), Some("100"));
}

#[test]
fn batch_tag_pairs() {
    let rec = Recorder::default();
    client(&rec)
        .batch_set_tag(&[("vip", "tok-a"), ("vip", "tok-b")])
        .unwrap();
    let (url, f) = rec.only();
    assert_eq!(url, "http://push.test/v2/tags/batch_set");
    assert_eq!(json_field(&f, "tag_token_list"), json!([["vip", "tok-a"], ["vip", "tok-b"]]));

    let rec = Recorder::default();
    client(&rec).batch_del_tag(&[("vip", "tok-a")]).unwrap();
    let (url, f) = rec.only();
    assert_eq!(url, "http://push.test/v2/tags/batch_del");
    assert_eq!(json_field(&f, "tag_token_list"), json!([["vip", "tok-a"]]));
}

fn record_one(call: impl FnOnce(&PushClient<&Recorder, FixedClock>)) -> (String, ParamSet) {
    let rec = Recorder::default();
    call(&client(&rec));
    rec.only()
}

#[test]
fn simple_lookups_and_deletes() {
    let (url, f) = record_one(|c| {
        c.cancel_timing_push("99").unwrap();
    });
    assert_eq!(url, Endpoint::CancelTimingPush.url("http://push.test/v2"));
    assert_eq!(f.get("push_id"), Some("99"));

    let (url, f) = record_one(|c| {
        c.query_token_tags("tok").unwrap();
    });
    assert_eq!(url, Endpoint::QueryTokenTags.url("http://push.test/v2"));
    assert_eq!(f.get("device_token"), Some("tok"));

    let (url, f) = record_one(|c| {
        c.query_tag_token_num("vip").unwrap();
    });
    assert_eq!(url, Endpoint::QueryTagTokenNum.url("http://push.test/v2"));
    assert_eq!(f.get("tag"), Some("vip"));

    let (url, f) = record_one(|c| {
        c.delete_account("acc").unwrap();
    });
    assert_eq!(url, Endpoint::DeleteAccountAllTokens.url("http://push.test/v2"));
    assert_eq!(f.get("account"), Some("acc"));
}

#[test]
fn delete_single_token() {
    let rec = Recorder::default();
    client(&rec).delete_account_token("acc", "tok").unwrap();
    let (url, f) = rec.only();
    assert_eq!(url, "http://push.test/v2/application/del_app_account_tokens");
    assert_eq!(f.get("account"), Some("acc"));
    assert_eq!(f.get("device_token"), Some("tok"));
}
