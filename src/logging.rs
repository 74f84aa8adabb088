use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::bus::NotificationBus;
use crate::error::{AppError, AppResult};

/// Filter directive for a `-v` count: warn, info, then debug. Errors are
/// always logged.
pub fn verbosity_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    }
}

/// `RUST_LOG` wins over the verbosity flag when it is set.
pub fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity_directive(verbosity)))
}

pub fn build_subscriber(log_file: File, filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync {
    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
}

/// Installs the global subscriber, truncating `log_file_path`.
pub fn init(log_file_path: &Path, verbosity: u8) -> AppResult<()> {
    let log_file = File::create(log_file_path).map_err(|source| {
        AppError::io_with_context(
            source,
            format!("failed to create log file: {}", log_file_path.display()),
        )
    })?;
    build_subscriber(log_file, env_filter(verbosity))
        .try_init()
        .map_err(|err| AppError::invalid_argument(format!("logging already initialised: {err}")))
}

/// Logs every transition from the observer dispatcher, off the input path.
pub fn attach_transition_log(bus: &NotificationBus) {
    bus.add_async_observer(|transition| {
        tracing::debug!(
            from = %transition.from,
            to = %transition.to,
            is_pop = transition.is_pop,
            "state transition"
        );
    });
}
