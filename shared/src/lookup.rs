use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::FormValues;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions at a coordinate, as returned by `/api/weather/`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    #[serde(rename = "temperature")]
    pub temperature_celsius: f64,
    #[serde(rename = "humidity")]
    pub humidity_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("geolocation is not available")]
    GeolocationUnavailable,
    #[error("geolocation permission denied")]
    GeolocationDenied,
    #[error("geolocation timed out")]
    GeolocationTimeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("service error: {0}")]
    Service(String),
}

impl LookupError {
    /// Whether the failure happened before any request left the browser.
    pub fn is_location(&self) -> bool {
        matches!(
            self,
            LookupError::GeolocationUnavailable
                | LookupError::GeolocationDenied
                | LookupError::GeolocationTimeout
        )
    }
}

pub trait LocationProvider {
    fn resolve_coordinate(&self) -> LocalBoxFuture<'static, Result<Coordinate, LookupError>>;
}

pub trait WeatherSource {
    fn fetch_weather(
        &self,
        coordinate: Coordinate,
    ) -> LocalBoxFuture<'static, Result<WeatherSample, LookupError>>;
}

pub trait RecommendationService {
    /// Returns the crop name from the service's `recommended_crop` field.
    fn recommend(&self, values: FormValues) -> LocalBoxFuture<'static, Result<String, LookupError>>;
}

/// Resolves the device position, then looks up the weather there.
pub async fn lookup_weather<L, W>(location: &L, weather: &W) -> Result<WeatherSample, LookupError>
where
    L: LocationProvider + ?Sized,
    W: WeatherSource + ?Sized,
{
    let coordinate = location.resolve_coordinate().await?;
    weather.fetch_weather(coordinate).await
}


#[cfg(test)]
mod tests {
    use super::fakes::*;
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn weather_is_fetched_at_resolved_coordinate() {
        let sample = WeatherSample {
            temperature_celsius: 24.36,
            humidity_percent: 71.04,
        };
        let weather = FixedWeather {
            reply: Some(Ok(sample)),
            ..Default::default()
        };

        let result = block_on(lookup_weather(&FixedLocation(Ok(HERE)), &weather));

        assert_eq!(result, Ok(sample));
        assert_eq!(*weather.seen.borrow(), vec![HERE]);
    }

    #[test]
    fn location_failure_skips_weather_call() {
        let weather = FixedWeather::default();
        let result = block_on(lookup_weather(
            &FixedLocation(Err(LookupError::GeolocationDenied)),
            &weather,
        ));

        assert_eq!(result, Err(LookupError::GeolocationDenied));
        assert!(weather.seen.borrow().is_empty());
    }

    #[test]
    fn location_errors_are_classified() {
        assert!(LookupError::GeolocationUnavailable.is_location());
        assert!(LookupError::GeolocationTimeout.is_location());
        assert!(!LookupError::Network("offline".into()).is_location());
        assert!(!LookupError::Service("500".into()).is_location());
    }

    #[test]
    fn weather_sample_uses_wire_names() {
        let sample: WeatherSample =
            serde_json::from_str(r#"{"temperature": 21.5, "humidity": 64}"#).unwrap();
        assert_eq!(sample.temperature_celsius, 21.5);
        assert_eq!(sample.humidity_percent, 64.0);
    }
}
