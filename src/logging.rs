//! Tracing subscriber setup
//!
//! The interactive mode owns the terminal, so it only logs when given a file.
//! Headless runs log to stderr. `RUST_LOG` overrides the default `info` filter.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    File(&'a Path),
    Stderr,
    Off,
}

impl<'a> LogTarget<'a> {
    /// Pick a target: an explicit file wins, otherwise stderr unless the terminal is in use
    pub fn select(log_file: Option<&'a Path>, terminal_in_use: bool) -> Self {
        match log_file {
            Some(path) => LogTarget::File(path),
            None if terminal_in_use => LogTarget::Off,
            None => LogTarget::Stderr,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Call once, before any engine work.
pub fn init(target: LogTarget<'_>) -> Result<()> {
    match target {
        LogTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| anyhow!("Failed to install tracing subscriber: {err}"))?;
        }
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|err| anyhow!("Failed to install tracing subscriber: {err}"))?;
        }
        LogTarget::Off => {}
    }
    Ok(())
}
