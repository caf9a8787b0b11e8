//! Diagnostics go to stderr so stdout stays a clean JSON channel.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub fn init(json: bool, verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    installed.map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}
