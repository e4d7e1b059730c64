//! Time-ordered weather forecast.

use chrono::{DateTime, FixedOffset, NaiveDate};
use companion_core::ValidationError;
use serde::Serialize;

use crate::types::WeatherState;

/// A single forecast point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastItem {
    /// Forecast time in the location's UTC offset.
    pub date_time: DateTime<FixedOffset>,
    pub weather_state: WeatherState,
}

/// An ordered sequence of (timestamp, weather state) pairs.
///
/// Items are kept sorted by instant; at most one state per instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Forecast {
    items: Vec<ForecastItem>,
}

impl Forecast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a weather state at its chronological position.
    ///
    /// # Errors
    /// Returns [`ValidationError::DuplicateForecastTime`] if the forecast
    /// already holds a state for the same instant.
    pub fn add(
        &mut self,
        date_time: DateTime<FixedOffset>,
        weather_state: WeatherState,
    ) -> Result<(), ValidationError> {
        match self
            .items
            .binary_search_by(|item| item.date_time.cmp(&date_time))
        {
            Ok(_) => Err(ValidationError::DuplicateForecastTime(date_time.to_rfc3339())),
            Err(position) => {
                self.items.insert(
                    position,
                    ForecastItem {
                        date_time,
                        weather_state,
                    },
                );
                Ok(())
            }
        }
    }

    /// All forecast times, earliest first.
    pub fn dates(&self) -> Vec<DateTime<FixedOffset>> {
        self.items.iter().map(|item| item.date_time).collect()
    }

    /// Weather states whose local date (in the forecast's offset) is `date`.
    pub fn states_for_date(&self, date: NaiveDate) -> Vec<&WeatherState> {
        self.items
            .iter()
            .filter(|item| item.date_time.date_naive() == date)
            .map(|item| &item.weather_state)
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Forecast {
    type Item = &'a ForecastItem;
    type IntoIter = std::slice::Iter<'a, ForecastItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
