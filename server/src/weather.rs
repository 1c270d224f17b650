use futures::future::{BoxFuture, FutureExt};
use serde::Deserialize;
use shared::{WeatherQuery, WeatherSample};
use std::time::Duration;

use crate::error::ApiError;

/// Source of current conditions behind `/api/weather/`.
pub trait WeatherProvider: Send + Sync {
    fn current(&self, query: WeatherQuery) -> BoxFuture<'_, Result<WeatherSample, ApiError>>;
}

/// Open-Meteo compatible forecast endpoint.
pub struct OpenMeteo {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    relative_humidity_2m: f64,
}

impl From<ForecastResponse> for WeatherSample {
    fn from(response: ForecastResponse) -> Self {
        WeatherSample {
            temperature_celsius: response.current.temperature_2m,
            humidity_percent: response.current.relative_humidity_2m,
        }
    }
}

impl OpenMeteo {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(OpenMeteo {
            client,
            base_url: base_url.into(),
        })
    }

    async fn fetch(&self, query: WeatherQuery) -> Result<WeatherSample, ApiError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", query.lat.to_string()),
                ("longitude", query.lon.to_string()),
                ("current", "temperature_2m,relative_humidity_2m".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;
        let forecast: ForecastResponse = response.json().await?;
        Ok(forecast.into())
    }
}

impl WeatherProvider for OpenMeteo {
    fn current(&self, query: WeatherQuery) -> BoxFuture<'_, Result<WeatherSample, ApiError>> {
        self.fetch(query).boxed()
    }
}

/// Checks the coordinate before it is sent upstream.
pub fn validate(query: &WeatherQuery) -> Result<(), ApiError> {
    if !query.lat.is_finite() || !(-90.0..=90.0).contains(&query.lat) {
        return Err(ApiError::InvalidCoordinate(format!(
            "lat must be between -90 and 90, got {}",
            query.lat
        )));
    }
    if !query.lon.is_finite() || !(-180.0..=180.0).contains(&query.lon) {
        return Err(ApiError::InvalidCoordinate(format!(
            "lon must be between -180 and 180, got {}",
            query.lon
        )));
    }
    Ok(())
}
