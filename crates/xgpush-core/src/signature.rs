//! Request signature derivation.
//!
//! The server recomputes the signature from the received fields, so the
//! derivation has to be byte-for-byte reproducible:
//!
//! ```text
//! md5_hex( k1 v1 k2 v2 ... kN vN  endpoint_url  secret_key )
//! ```
//!
//! Keys are visited in [`ParamSet`] order and concatenated with their values
//! without any separator. The `sign` field itself never participates.
//! Two different field sets may concatenate to the same input; the wire
//! protocol defines it that way and the client has to match it exactly.

use md5::{Digest, Md5};

use crate::params::ParamSet;

/// Name of the field carrying the signature on the wire.
pub const SIGN_FIELD: &str = "sign";

/// Length of a rendered signature (MD5, lowercase hex).
pub const SIGNATURE_HEX_LEN: usize = 32;

/// Build the exact byte string that gets digested.
pub fn signing_input(endpoint_url: &str, fields: &ParamSet, secret_key: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    for (k, v) in fields.sorted_pairs() {
        if k == SIGN_FIELD {
            continue;
        }
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(v.as_bytes());
    }
    buf.extend_from_slice(endpoint_url.as_bytes());
    buf.extend_from_slice(secret_key.as_bytes());
    buf
}

/// Compute the lowercase hex MD5 signature for a completed field set.
pub fn derive_signature(endpoint_url: &str, fields: &ParamSet, secret_key: &str) -> String {
    let input = signing_input(endpoint_url, fields, secret_key);
    let mut h = Md5::new();
    h.update(&input);
    hex::encode(h.finalize())
}

/// Recompute and compare against a candidate signature (case-insensitive hex).
pub fn verify_signature(endpoint_url: &str, fields: &ParamSet, secret_key: &str, candidate: &str) -> bool {
    let expected = derive_signature(endpoint_url, fields, secret_key);
    candidate.len() == SIGNATURE_HEX_LEN && expected.eq_ignore_ascii_case(candidate)
}
