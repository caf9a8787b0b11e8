use std::fs;

use anyhow::{anyhow, Context, Result};

use xgpush_client::ParamSet;

/// Parse `key=value`. The value may be empty or contain further `=`.
pub fn parse_pair(raw: &str) -> Result<(String, String)> {
    let (k, v) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key=value, got {raw:?}"))?;
    if k.is_empty() {
        return Err(anyhow!("empty key in {raw:?}"));
    }
    Ok((k.to_string(), v.to_string()))
}

pub fn parse_params(raw: &[String]) -> Result<ParamSet> {
    let pairs = raw.iter().map(|r| parse_pair(r)).collect::<Result<Vec<_>>>()?;
    Ok(ParamSet::try_from_pairs(pairs)?)
}

/// Tag/token pairs given as `TAG=TOKEN`.
pub fn parse_tag_pairs(raw: &[String]) -> Result<Vec<(String, String)>> {
    raw.iter()
        .map(|r| {
            let (tag, token) = parse_pair(r)?;
            if token.is_empty() {
                return Err(anyhow!("empty token in {r:?}"));
            }
            Ok((tag, token))
        })
        .collect()
}

/// Inline text, or the contents of a file when written as `@path`.
pub fn read_payload(arg: &str) -> Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => {
            let raw = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            Ok(raw.trim_end().to_string())
        }
        None => Ok(arg.to_string()),
    }
}
