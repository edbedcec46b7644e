//! Logging infrastructure for the enrichment service.
//!
//! This module initializes the tracing subscriber for structured logging.
//! All logs are emitted to stderr to keep stdout clean for data output.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, AppResult};

/// Initialize the tracing subscriber with stderr output.
///
/// The filter resolves in order: the explicit `log_level` argument, then
/// `RUST_LOG`, then `"info"`.
///
/// # Arguments
/// * `log_level` - Optional filter override (e.g., "debug", "enrichd=trace")
/// * `no_color` - Disable ANSI colors
pub fn init_logging(log_level: Option<&str>, no_color: bool) -> AppResult<()> {
    let default_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let filter_str = log_level.unwrap_or(&default_level);

    let env_filter = EnvFilter::try_new(filter_str)
        .map_err(|e| AppError::Config(format!("Invalid log filter: {}", e)))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(!no_color && color_allowed());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AppError::Config(format!("Failed to init logging: {}", e)))?;

    tracing::debug!("Logging initialized with filter '{}'", filter_str);

    Ok(())
}

/// Color is suppressed when the NO_COLOR convention variable is set.
fn color_allowed() -> bool {
    std::env::var("NO_COLOR").is_err()
}
