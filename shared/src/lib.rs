use serde::{Deserialize, Serialize};
pub mod flow;
pub mod form;
pub mod lookup;
pub mod outcome;
pub mod projection;
pub mod session;

pub use form::{Field, FormValues};
pub use lookup::{Coordinate, LookupError, WeatherSample};
pub use outcome::RecommendationOutcome;
pub use session::Session;

pub const RECOMMEND_PATH: &str = "/api/recommend/";
pub const WEATHER_PATH: &str = "/api/weather/";

/// Body of a successful `POST /api/recommend/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommended_crop: String,
}

/// Query string of `GET /api/weather/`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherQuery {
    pub lat: f64,
    pub lon: f64,
}

impl From<Coordinate> for WeatherQuery {
    fn from(coordinate: Coordinate) -> Self {
        WeatherQuery {
            lat: coordinate.latitude,
            lon: coordinate.longitude,
        }
    }
}

impl WeatherQuery {
    pub fn url(&self) -> String {
        format!("{}?lat={}&lon={}", WEATHER_PATH, self.lat, self.lon)
    }
}

/// Body of every non-2xx API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
