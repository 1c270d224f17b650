use serde_json::{Map, Value};
use shared::Field;

use crate::error::ApiError;

const FEATURES: usize = 7;

/// Soil and weather readings in `Field::ALL` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditions([f64; FEATURES]);

impl Conditions {
    pub fn new(values: [f64; FEATURES]) -> Self {
        Conditions(values)
    }

    /// Reads all seven keys from a request body. Values may be JSON numbers
    /// or numeric strings.
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, ApiError> {
        if !Field::ALL.iter().all(|field| body.contains_key(field.wire_name())) {
            return Err(ApiError::MissingFields);
        }

        let mut values = [0.0; FEATURES];
        for (slot, field) in values.iter_mut().zip(Field::ALL.iter()) {
            let name = field.wire_name();
            *slot = numeric(name, &body[name])?;
        }
        Ok(Conditions::new(values))
    }
}

fn numeric(name: &str, value: &Value) -> Result<f64, ApiError> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(number) if number.is_finite() => Ok(number),
        _ => Err(ApiError::InvalidFormat(format!(
            "{} must be a number, got {}",
            name, value
        ))),
    }
}

struct Centroid {
    crop: &'static str,
    features: [f64; FEATURES],
}

// typical spread of each feature across all crops
const SCALE: [f64; FEATURES] = [36.9, 32.9, 50.6, 5.06, 22.3, 0.77, 55.0];

// mean N, P, K, temperature, humidity, ph, rainfall per crop
const CENTROIDS: [Centroid; 22] = [
    Centroid { crop: "rice", features: [79.89, 47.58, 39.87, 23.69, 82.27, 6.43, 236.18] },
    Centroid { crop: "maize", features: [77.76, 48.44, 19.79, 22.39, 65.09, 6.25, 84.77] },
    Centroid { crop: "chickpea", features: [40.09, 67.79, 79.92, 18.87, 16.86, 7.34, 80.06] },
    Centroid { crop: "kidneybeans", features: [20.75, 67.54, 20.05, 20.12, 21.61, 5.75, 105.92] },
    Centroid { crop: "pigeonpeas", features: [20.73, 67.73, 20.29, 27.74, 48.06, 5.79, 149.46] },
    Centroid { crop: "mothbeans", features: [21.44, 48.01, 20.23, 28.19, 53.16, 6.83, 51.20] },
    Centroid { crop: "mungbean", features: [20.99, 47.28, 19.87, 28.53, 85.50, 6.72, 48.40] },
    Centroid { crop: "blackgram", features: [40.02, 67.47, 19.24, 29.97, 65.12, 7.13, 67.88] },
    Centroid { crop: "lentil", features: [18.77, 68.36, 19.41, 24.51, 64.80, 6.93, 45.68] },
    Centroid { crop: "pomegranate", features: [18.87, 18.75, 40.21, 21.84, 90.13, 6.43, 107.53] },
    Centroid { crop: "banana", features: [100.23, 82.01, 50.05, 27.38, 80.36, 5.98, 104.63] },
    Centroid { crop: "mango", features: [20.07, 27.18, 29.92, 31.21, 50.16, 5.77, 94.70] },
    Centroid { crop: "grapes", features: [23.18, 132.53, 200.11, 23.85, 81.88, 6.03, 69.61] },
    Centroid { crop: "watermelon", features: [99.42, 17.00, 50.22, 25.59, 85.16, 6.50, 50.79] },
    Centroid { crop: "muskmelon", features: [100.32, 17.72, 50.08, 28.66, 92.34, 6.36, 24.69] },
    Centroid { crop: "apple", features: [20.80, 134.22, 199.89, 22.63, 92.33, 5.93, 112.65] },
    Centroid { crop: "orange", features: [19.58, 16.55, 10.01, 22.77, 92.17, 7.02, 110.47] },
    Centroid { crop: "papaya", features: [49.88, 59.05, 50.04, 33.72, 92.40, 6.74, 142.63] },
    Centroid { crop: "coconut", features: [21.98, 16.93, 30.59, 27.41, 94.84, 5.98, 175.69] },
    Centroid { crop: "cotton", features: [117.77, 46.24, 19.56, 23.99, 79.84, 6.91, 80.40] },
    Centroid { crop: "jute", features: [78.40, 46.86, 39.99, 24.96, 79.64, 6.73, 174.79] },
    Centroid { crop: "coffee", features: [101.20, 28.74, 29.94, 25.54, 58.87, 6.79, 158.07] },
];

/// Nearest-centroid classifier over scaled features.
pub fn recommend(conditions: &Conditions) -> &'static str {
    CENTROIDS
        .iter()
        .map(|centroid| (centroid.crop, distance(&conditions.0, &centroid.features)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(crop, _)| crop)
        .unwrap_or(CENTROIDS[0].crop)
}

fn distance(a: &[f64; FEATURES], b: &[f64; FEATURES]) -> f64 {
    a.iter()
        .zip(b.iter())
        .zip(SCALE.iter())
        .map(|((x, y), scale)| ((x - y) / scale).powi(2))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn reads_numbers_and_numeric_strings() {
        let conditions = Conditions::from_json(&body(json!({
            "N": "90", "P": 42, "K": "43", "temperature": "20.8",
            "humidity": 82.0, "ph": " 6.5 ", "rainfall": "202.9"
        })))
        .unwrap();
        assert_eq!(
            conditions,
            Conditions::new([90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9])
        );
    }

    #[test]
    fn missing_key_is_reported_before_format() {
        let err = Conditions::from_json(&body(json!({
            "N": "abc", "P": 42, "K": 43, "temperature": 20.8, "humidity": 82.0, "ph": 6.5
        })))
        .unwrap_err();
        assert!(matches!(err, ApiError::MissingFields));
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        for bad in vec![json!("abc"), json!(""), json!(null), json!([1]), json!("NaN")] {
            let err = Conditions::from_json(&body(json!({
                "N": 90, "P": 42, "K": 43, "temperature": 20.8,
                "humidity": 82.0, "ph": bad, "rainfall": 202.9
            })))
            .unwrap_err();
            match err {
                ApiError::InvalidFormat(detail) => assert!(detail.starts_with("ph ")),
                other => panic!("unexpected error {:?}", other),
            }
        }
    }

    #[test]
    fn classic_paddy_conditions_give_rice() {
        let conditions = Conditions::new([90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9]);
        assert_eq!(recommend(&conditions), "rice");
    }

    #[test]
    fn every_centroid_recommends_itself() {
        for centroid in CENTROIDS.iter() {
            assert_eq!(recommend(&Conditions::new(centroid.features)), centroid.crop);
        }
    }

    #[test]
    fn high_potassium_and_phosphorus_favour_orchard_crops() {
        let crop = recommend(&Conditions::new([22.0, 133.0, 200.0, 22.5, 92.0, 5.9, 110.0]));
        assert_eq!(crop, "apple");
    }
}
