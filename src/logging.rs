//! Installs the tracing subscriber used by the CLI and the HTTP server.
//!
//! Library code only emits `tracing` events; nothing is printed unless the
//! binary calls [`init_logging`]. Output goes to stderr so that `qqlist
//! resolve --json` keeps stdout clean.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::{
    config::LoggingConfig,
    error::{PlaylistError, Result},
};

pub fn init_logging(cfg: &LoggingConfig) -> Result<()> {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::new(cfg.filter_directives.clone()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(cfg.include_target);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| PlaylistError::Config(format!("logger already initialized: {e}")))
}
