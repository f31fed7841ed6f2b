//! Structured logging setup

use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::Result};

/// Build the log filter from `service.log_level`, falling back to `info`
/// when the directive does not parse
pub fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global JSON subscriber
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &Config) -> Result<()> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter(&config.service.log_level))
        .try_init()
        .map_err(|e| crate::error::Error::Internal(format!("Failed to initialize tracing: {}", e)))?;

    tracing::info!(
        environment = %config.service.environment,
        "Tracing initialized for service: {}",
        config.service.name
    );

    Ok(())
}
