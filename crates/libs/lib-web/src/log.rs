//! # Tracing Setup
//!
//! Installs the global `tracing` subscriber.
//!
//! The level comes from `LOG_LEVEL` (`trace`, `debug`, `info`, `warn`,
//! `error`); without it, debug configurations log at `debug` and everything
//! else at `info`. Debug configurations also get thread ids and source
//! locations on each line.

use tracing_subscriber::EnvFilter;

/// Level used when `LOG_LEVEL` is unset or unrecognised.
pub fn default_level(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info"
    }
}

/// Resolve the effective level from an optional `LOG_LEVEL` value.
pub fn resolve_level(log_level: Option<&str>, debug: bool) -> String {
    match log_level.map(str::to_lowercase).as_deref() {
        Some(level @ ("trace" | "debug" | "info" | "warn" | "error")) => level.to_string(),
        _ => default_level(debug).to_string(),
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_tracing(debug: bool) -> anyhow::Result<()> {
    let log_level = resolve_level(std::env::var("LOG_LEVEL").ok().as_deref(), debug);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&log_level))
        .with_target(true)
        .with_thread_ids(debug)
        .with_line_number(debug)
        .with_file(debug)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {e}"))?;

    tracing::info!(" Log level: {}", log_level);
    Ok(())
}
