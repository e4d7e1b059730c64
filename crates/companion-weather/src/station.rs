//! Weather station port.
//!
//! [`WeatherStation`] is the capability the companion needs from an upstream
//! weather provider. Adapters (see [`crate::provider`]) implement it; tests
//! implement it with hand-written doubles.

use async_trait::async_trait;
use chrono::NaiveDate;
use companion_core::ValidationError;
use thiserror::Error;

use crate::forecast::Forecast;
use crate::location::Location;
use crate::types::WeatherState;

/// Weather provider errors
#[derive(Debug, Error)]
pub enum StationError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Weather API returned an error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Malformed provider payload: {0}")]
    MalformedPayload(String),

    #[error("Error creating weather state: {0}")]
    InvalidState(#[from] ValidationError),

    #[error("Weather station unavailable: {0}")]
    Unavailable(String),
}

impl StationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StationError::Network(_) => "Unable to reach the weather service. Check your connection.",
            StationError::Api { status, .. } if *status == 401 => {
                "Weather API key is invalid. Check settings."
            }
            StationError::Api { status, .. } if *status >= 500 => {
                "The weather service is experiencing issues. Please try again later."
            }
            StationError::Api { .. } => "Weather service error. Please try again.",
            StationError::MalformedPayload(_) | StationError::InvalidState(_) => {
                "The weather service returned unexpected data."
            }
            StationError::Unavailable(_) => "Weather service unavailable. Check settings.",
        }
    }
}

/// Source of current conditions and forecasts.
#[async_trait]
pub trait WeatherStation: Send + Sync {
    /// Current weather at `location`.
    async fn get_current_state(&self, location: &Location) -> Result<WeatherState, StationError>;

    /// Forecast points at `location` whose local date lies in
    /// `[start_date, end_date]`.
    async fn get_forecast(
        &self,
        location: &Location,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Forecast, StationError>;
}
