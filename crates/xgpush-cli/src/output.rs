use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use xgpush_client::{Outcome, ResponseEnvelope};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

pub fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = if is_json() {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{s}");
    Ok(())
}

/// Print an envelope; in human mode a colored status line goes to stderr first.
pub fn print_envelope(endpoint: &str, env: &ResponseEnvelope) -> anyhow::Result<()> {
    if !is_json() {
        status_line(endpoint, env)?;
    }
    print(env)
}

fn status_line(endpoint: &str, env: &ResponseEnvelope) -> io::Result<()> {
    let mut err = StandardStream::stderr(ColorChoice::Auto);
    let (color, label) = match env.outcome() {
        Outcome::Success => (Color::Green, "ok"),
        Outcome::RemoteRejection => (Color::Yellow, "rejected"),
        Outcome::LocalFailure => (Color::Red, "failed"),
    };
    err.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(err, "{label:>8}")?;
    err.reset()?;
    if env.err_msg.is_empty() {
        writeln!(err, " {endpoint} ret_code={}", env.ret_code)
    } else {
        writeln!(err, " {endpoint} ret_code={} {}", env.ret_code, env.err_msg)
    }
}

/// Spinner on stderr while a request is in flight. Hidden in JSON mode.
pub fn spinner(msg: impl Into<String>) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
