//! Tracing installation for hosts that do not configure their own subscriber.

use std::sync::Once;

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable read for filter directives.
pub const LOG_ENV: &str = "WATERUI_HEAD_LOG";

const DEFAULT_FILTER: &str = "info";

static TRACING_INSTALLED: Once = Once::new();

/// Installs a `fmt` subscriber filtered by [`LOG_ENV`] (idempotent).
///
/// Falls back to `info` when the variable is unset or invalid.
pub fn install_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(filter);
}

/// Installs a `fmt` subscriber with explicit filter directives (idempotent).
///
/// Only the first installation in a process takes effect.
pub fn install_tracing_with(directives: &str) {
    install(EnvFilter::new(directives));
}

fn install(filter: EnvFilter) {
    TRACING_INSTALLED.call_once(|| {
        let console = fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_filter(filter);

        if tracing_subscriber::registry().with(console).try_init().is_err() {
            eprintln!("waterui-head tracing subscriber failed to initialize");
        }
    });
}
