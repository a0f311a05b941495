//! # Telemetry
//!
//! Tracing subscriber setup for binaries embedding the crate.
//!
//! `RUST_LOG` takes precedence; otherwise events from this crate are
//! filtered at the configured [`LoggingSettings::level`].

use crate::config::LoggingSettings;
use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Builds the fallback filter directive for `settings`.
#[must_use]
pub fn default_directive(settings: &LoggingSettings) -> String {
    format!("lead_desk={}", settings.level)
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(settings: &LoggingSettings) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(settings)));

    let fmt_layer = if settings.json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    tracing::debug!(level = %settings.level, json = settings.json, "tracing initialized");
    Ok(())
}
