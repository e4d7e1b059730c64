use companion_core::ValidationError;
use serde::{Deserialize, Serialize};

/// A snapshot of atmospheric measurements at a point in time.
///
/// Always built through [`WeatherStateBuilder`], so the mandatory readings are
/// present and every optional reading is within a physically sane range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WeatherStateBuilder")]
pub struct WeatherState {
    temperature: f64,
    humidity: f64,
    feels_like: f64,
    pressure: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    wind_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wind_gust: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wind_direction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    clouds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rain_1h: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rain_3h: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    snow_1h: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    snow_3h: Option<f64>,
}

impl WeatherState {
    pub fn builder() -> WeatherStateBuilder {
        WeatherStateBuilder::default()
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Relative humidity, percent.
    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    pub fn feels_like(&self) -> f64 {
        self.feels_like
    }

    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    pub fn wind_speed(&self) -> Option<f64> {
        self.wind_speed
    }

    pub fn wind_gust(&self) -> Option<f64> {
        self.wind_gust
    }

    /// Meteorological degrees, 0-360.
    pub fn wind_direction(&self) -> Option<f64> {
        self.wind_direction
    }

    /// Cloud cover, percent.
    pub fn clouds(&self) -> Option<f64> {
        self.clouds
    }

    pub fn rain_1h(&self) -> Option<f64> {
        self.rain_1h
    }

    pub fn rain_3h(&self) -> Option<f64> {
        self.rain_3h
    }

    pub fn snow_1h(&self) -> Option<f64> {
        self.snow_1h
    }

    pub fn snow_3h(&self) -> Option<f64> {
        self.snow_3h
    }
}

/// Collects readings and validates them into a [`WeatherState`].
///
/// Setters accept either a value or an `Option`, so provider payloads with
/// missing fields can be fed in directly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherStateBuilder {
    temperature: Option<f64>,
    humidity: Option<f64>,
    feels_like: Option<f64>,
    pressure: Option<f64>,
    wind_speed: Option<f64>,
    wind_gust: Option<f64>,
    wind_direction: Option<f64>,
    clouds: Option<f64>,
    rain_1h: Option<f64>,
    rain_3h: Option<f64>,
    snow_1h: Option<f64>,
    snow_3h: Option<f64>,
}

impl WeatherStateBuilder {
    pub fn temperature(mut self, value: impl Into<Option<f64>>) -> Self {
        self.temperature = value.into();
        self
    }

    pub fn humidity(mut self, value: impl Into<Option<f64>>) -> Self {
        self.humidity = value.into();
        self
    }

    pub fn feels_like(mut self, value: impl Into<Option<f64>>) -> Self {
        self.feels_like = value.into();
        self
    }

    pub fn pressure(mut self, value: impl Into<Option<f64>>) -> Self {
        self.pressure = value.into();
        self
    }

    pub fn wind_speed(mut self, value: impl Into<Option<f64>>) -> Self {
        self.wind_speed = value.into();
        self
    }

    pub fn wind_gust(mut self, value: impl Into<Option<f64>>) -> Self {
        self.wind_gust = value.into();
        self
    }

    pub fn wind_direction(mut self, value: impl Into<Option<f64>>) -> Self {
        self.wind_direction = value.into();
        self
    }

    pub fn clouds(mut self, value: impl Into<Option<f64>>) -> Self {
        self.clouds = value.into();
        self
    }

    pub fn rain_1h(mut self, value: impl Into<Option<f64>>) -> Self {
        self.rain_1h = value.into();
        self
    }

    pub fn rain_3h(mut self, value: impl Into<Option<f64>>) -> Self {
        self.rain_3h = value.into();
        self
    }

    pub fn snow_1h(mut self, value: impl Into<Option<f64>>) -> Self {
        self.snow_1h = value.into();
        self
    }

    pub fn snow_3h(mut self, value: impl Into<Option<f64>>) -> Self {
        self.snow_3h = value.into();
        self
    }

    /// Validate and build the weather state.
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingField`] if temperature, humidity,
    /// feels-like or pressure is absent, and a range error for any reading
    /// outside its physical bounds.
    pub fn build(self) -> Result<WeatherState, ValidationError> {
        let temperature = self.temperature.ok_or(ValidationError::MissingField("Temperature"))?;
        let humidity = self.humidity.ok_or(ValidationError::MissingField("Humidity"))?;
        let feels_like = self.feels_like.ok_or(ValidationError::MissingField("Feels like"))?;
        let pressure = self.pressure.ok_or(ValidationError::MissingField("Pressure"))?;

        check_range("Humidity", humidity, 0.0, 100.0)?;
        check_non_negative("Pressure", pressure)?;

        if let Some(speed) = self.wind_speed {
            check_non_negative("Wind speed", speed)?;
        }
        if let Some(gust) = self.wind_gust {
            check_non_negative("Wind gust", gust)?;
        }
        if let Some(direction) = self.wind_direction {
            check_range("Wind direction", direction, 0.0, 360.0)?;
        }
        if let Some(clouds) = self.clouds {
            check_range("Clouds", clouds, 0.0, 100.0)?;
        }
        for (field, value) in [
            ("Rain (1h)", self.rain_1h),
            ("Rain (3h)", self.rain_3h),
            ("Snow (1h)", self.snow_1h),
            ("Snow (3h)", self.snow_3h),
        ] {
            if let Some(value) = value {
                check_non_negative(field, value)?;
            }
        }

        Ok(WeatherState {
            temperature,
            humidity,
            feels_like,
            pressure,
            wind_speed: self.wind_speed,
            wind_gust: self.wind_gust,
            wind_direction: self.wind_direction,
            clouds: self.clouds,
            rain_1h: self.rain_1h,
            rain_3h: self.rain_3h,
            snow_1h: self.snow_1h,
            snow_3h: self.snow_3h,
        })
    }
}

impl TryFrom<WeatherStateBuilder> for WeatherState {
    type Error = ValidationError;

    fn try_from(builder: WeatherStateBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            min,
            max,
            value,
        })
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::Negative { field, value })
    }
}
