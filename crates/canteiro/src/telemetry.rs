//! Logging setup for binaries and tests embedding the crate.
//!
//! Library code logs through the `log` facade and opens `tracing` spans
//! around store and session work. [`init_logging`] installs a subscriber
//! for both.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Installs the global subscriber. `RUST_LOG` wins over `default_filter`.
///
/// Returns `Ok(false)` when a subscriber was already installed, by an
/// earlier call or by the host application.
pub fn init_logging(default_filter: &str, format: LogFormat) -> Result<bool, ParseError> {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(false);
    }

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter).inspect_err(|_| {
            INITIALIZED.store(false, Ordering::SeqCst);
        })?,
    };

    let (text, json) = match format {
        LogFormat::Text => (Some(fmt::layer().with_target(true)), None),
        LogFormat::Json => (None, Some(fmt::layer().json().with_current_span(true))),
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json);

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return Ok(false);
    }
    if let Err(e) = tracing_log::LogTracer::init() {
        tracing::debug!("log records not bridged: {}", e);
    }
    Ok(true)
}
