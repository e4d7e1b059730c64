//! Weather data for the Weather Companion.
//!
//! Provides validated locations and weather states, time-ordered forecasts,
//! the [`WeatherStation`] port and its OpenWeatherMap adapter.

pub mod forecast;
pub mod location;
pub mod provider;
pub mod station;
pub mod types;

pub use forecast::{Forecast, ForecastItem};
pub use location::Location;
pub use provider::{OwmClient, OwmWeatherStation};
pub use station::{StationError, WeatherStation};
pub use types::{WeatherState, WeatherStateBuilder};
