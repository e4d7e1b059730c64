//! Shared foundations for the Weather Companion workspace: configuration,
//! validation errors and logging setup.

pub mod config;
pub mod error;

pub use config::{
    Config, ConfigValidationError, HomeLocation, LoggingConfig, UserConfig, ValidationResult,
    WeatherConfig,
};
pub use error::{ConfigError, ValidationError};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging.
///
/// `RUST_LOG` takes precedence over `default_filter`.
pub fn init(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!("Weather Companion core initialized");
    Ok(())
}
