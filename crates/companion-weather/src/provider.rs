//! OpenWeatherMap adapter.
//!
//! [`OwmClient`] speaks the HTTP API; [`OwmWeatherStation`] maps its payloads
//! into validated [`WeatherState`]s and [`Forecast`]s.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use companion_core::WeatherConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::instrument;

use crate::forecast::Forecast;
use crate::location::Location;
use crate::station::{StationError, WeatherStation};
use crate::types::WeatherState;

const USER_AGENT: &str = "weather-companion/0.1.0";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OwmConditions {
    main: Option<OwmMain>,
    wind: Option<OwmWind>,
    clouds: Option<OwmClouds>,
    rain: Option<OwmPrecipitation>,
    snow: Option<OwmPrecipitation>,
}

#[derive(Debug, Default, Deserialize)]
struct OwmMain {
    temp: Option<f64>,
    humidity: Option<f64>,
    feels_like: Option<f64>,
    pressure: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwmWind {
    speed: Option<f64>,
    gust: Option<f64>,
    deg: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwmClouds {
    all: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwmPrecipitation {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "3h")]
    three_hours: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmForecast {
    #[serde(default)]
    list: Vec<OwmForecastItem>,
    city: Option<OwmCity>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: Option<i64>,
    #[serde(flatten)]
    conditions: OwmConditions,
}

#[derive(Debug, Deserialize)]
struct OwmCity {
    /// Shift from UTC in seconds
    timezone: Option<i32>,
}

/// HTTP client for the OpenWeatherMap 2.5 API.
#[derive(Debug, Clone)]
pub struct OwmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OwmClient {
    /// # Errors
    /// Returns [`StationError::Network`] if the HTTP client can't be built.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StationError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Build a client from the `[weather]` configuration table.
    ///
    /// # Errors
    /// Returns [`StationError::Unavailable`] when no API key is configured.
    pub fn from_config(config: &WeatherConfig) -> Result<Self, StationError> {
        let api_key = config
            .effective_api_key()
            .ok_or_else(|| StationError::Unavailable("no API key configured".to_string()))?;
        Self::new(
            api_key,
            config.base_url.as_str(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    #[instrument(skip(self), level = "debug")]
    pub(crate) async fn current_conditions(
        &self,
        location: &Location,
    ) -> Result<OwmConditions, StationError> {
        self.get("weather", location).await
    }

    #[instrument(skip(self), level = "debug")]
    pub(crate) async fn forecast(&self, location: &Location) -> Result<OwmForecast, StationError> {
        self.get("forecast", location).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        location: &Location,
    ) -> Result<T, StationError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", location.latitude().to_string()),
                ("lon", location.longitude().to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!("OpenWeatherMap returned status {} for /{}", status, endpoint);
            return Err(StationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| StationError::MalformedPayload(e.to_string()))
    }
}

/// [`WeatherStation`] backed by OpenWeatherMap.
#[derive(Debug, Clone)]
pub struct OwmWeatherStation {
    client: OwmClient,
}

impl OwmWeatherStation {
    pub fn new(client: OwmClient) -> Self {
        Self { client }
    }

    fn build_weather_state(conditions: &OwmConditions) -> Result<WeatherState, StationError> {
        let main = conditions.main.as_ref();
        let wind = conditions.wind.as_ref();
        let rain = conditions.rain.as_ref();
        let snow = conditions.snow.as_ref();

        let state = WeatherState::builder()
            .temperature(main.and_then(|m| m.temp))
            .humidity(main.and_then(|m| m.humidity))
            .feels_like(main.and_then(|m| m.feels_like))
            .pressure(main.and_then(|m| m.pressure))
            .wind_speed(wind.and_then(|w| w.speed))
            .wind_gust(wind.and_then(|w| w.gust))
            .wind_direction(wind.and_then(|w| w.deg))
            .clouds(conditions.clouds.as_ref().and_then(|c| c.all))
            .rain_1h(rain.and_then(|r| r.one_hour))
            .rain_3h(rain.and_then(|r| r.three_hours))
            .snow_1h(snow.and_then(|s| s.one_hour))
            .snow_3h(snow.and_then(|s| s.three_hours))
            .build()?;

        Ok(state)
    }

    fn build_forecast(
        payload: &OwmForecast,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Forecast, StationError> {
        let offset_seconds = payload
            .city
            .as_ref()
            .and_then(|city| city.timezone)
            .ok_or_else(|| StationError::MalformedPayload("missing timezone".to_string()))?;
        let offset = FixedOffset::east_opt(offset_seconds).ok_or_else(|| {
            StationError::MalformedPayload(format!("invalid timezone offset {}", offset_seconds))
        })?;

        if payload.list.is_empty() {
            return Err(StationError::MalformedPayload(
                "missing forecasts list".to_string(),
            ));
        }

        let mut forecast = Forecast::new();
        for item in &payload.list {
            let timestamp = item
                .dt
                .ok_or_else(|| StationError::MalformedPayload("missing forecast date".to_string()))?;
            let date_time = DateTime::from_timestamp(timestamp, 0)
                .ok_or_else(|| {
                    StationError::MalformedPayload(format!("invalid forecast date {}", timestamp))
                })?
                .with_timezone(&offset);

            let local_date = date_time.date_naive();
            if local_date < start_date || local_date > end_date {
                continue;
            }

            let state = Self::build_weather_state(&item.conditions)?;
            forecast.add(date_time, state)?;
        }

        Ok(forecast)
    }
}

#[async_trait]
impl WeatherStation for OwmWeatherStation {
    async fn get_current_state(&self, location: &Location) -> Result<WeatherState, StationError> {
        let conditions = self.client.current_conditions(location).await?;
        Self::build_weather_state(&conditions)
    }

    async fn get_forecast(
        &self,
        location: &Location,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Forecast, StationError> {
        let payload = self.client.forecast(location).await?;
        let forecast = Self::build_forecast(&payload, start_date, end_date)?;
        tracing::debug!(
            "Forecast for {} between {} and {} has {} points",
            location,
            start_date,
            end_date,
            forecast.len()
        );
        Ok(forecast)
    }
}
