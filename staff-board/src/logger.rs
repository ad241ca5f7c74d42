//! Logging Infrastructure
//!
//! Console logging for development (pretty) and production (JSON).
//! `RUST_LOG` overrides the level passed in.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the global subscriber.
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
/// * `json_format` - Whether to use JSON format (true for production, false for development)
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init()?;
    }

    tracing::debug!(level, json_format, "Logger initialized");
    Ok(())
}
