use actix_web::{error, get, post, web, HttpResponse, Responder};
use serde_json::{Map, Value};
use shared::{Recommendation, WeatherQuery};
use std::sync::Arc;

use crate::crop_model::{self, Conditions};
use crate::error::ApiError;
use crate::weather::{self, WeatherProvider};

pub struct AppData {
    pub weather: Arc<dyn WeatherProvider>,
}

// ---- Apis ("/api/*") ----

#[post("/recommend/")]
async fn recommend_request(body: web::Json<Map<String, Value>>) -> Result<impl Responder, ApiError> {
    let conditions = Conditions::from_json(&body)?;
    let crop = crop_model::recommend(&conditions);
    tracing::info!(crop, "recommendation served");

    Ok(web::Json(Recommendation {
        recommended_crop: crop.to_string(),
    }))
}

#[get("/weather/")]
async fn weather_request(
    data: web::Data<AppData>,
    query: web::Query<WeatherQuery>,
) -> Result<impl Responder, ApiError> {
    let query = query.into_inner();
    weather::validate(&query)?;

    match data.weather.current(query).await {
        Ok(sample) => Ok(web::Json(sample)),
        Err(err) => {
            tracing::warn!("weather lookup at {},{} failed: {}", query.lat, query.lon, err);
            Err(err)
        }
    }
}

fn bad_request(message: String) -> error::Error {
    let body = shared::ErrorBody {
        error: format!("Invalid data format: {}", message),
    };
    error::InternalError::from_response(message, HttpResponse::BadRequest().json(body)).into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| bad_request(err.to_string())))
        .app_data(web::QueryConfig::default().error_handler(|err, _| bad_request(err.to_string())))
        .service(
            web::scope("/api")
                .service(recommend_request)
                .service(weather_request)
                .default_service(web::route().to(HttpResponse::NotFound)),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use futures::future::{self, BoxFuture, FutureExt};
    use serde_json::json;
    use shared::{ErrorBody, WeatherSample};

    struct FakeWeather(Option<WeatherSample>);

    impl WeatherProvider for FakeWeather {
        fn current(&self, _: WeatherQuery) -> BoxFuture<'_, Result<WeatherSample, ApiError>> {
            let reply = self
                .0
                .ok_or_else(|| ApiError::Upstream("upstream returned 503".into()));
            future::ready(reply).boxed()
        }
    }

    fn app_data(sample: Option<WeatherSample>) -> web::Data<AppData> {
        web::Data::new(AppData {
            weather: Arc::new(FakeWeather(sample)),
        })
    }

    #[actix_web::test]
    async fn recommends_rice_for_paddy_conditions() {
        let app = test::init_service(App::new().app_data(app_data(None)).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/recommend/")
            .set_json(json!({
                "N": "90", "P": "42", "K": "43", "temperature": "20.8",
                "humidity": "82.0", "ph": "6.5", "rainfall": "202.9"
            }))
            .to_request();

        let body: Recommendation = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.recommended_crop, "rice");
    }

    #[actix_web::test]
    async fn missing_field_is_bad_request() {
        let app = test::init_service(App::new().app_data(app_data(None)).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/recommend/")
            .set_json(json!({"N": 90, "P": 42}))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.error, "Missing one or more required fields.");
    }

    #[actix_web::test]
    async fn malformed_json_is_bad_request() {
        let app = test::init_service(App::new().app_data(app_data(None)).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/recommend/")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"N\": ")
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert!(body.error.starts_with("Invalid data format"));
    }

    #[actix_web::test]
    async fn weather_returns_sample() {
        let sample = WeatherSample {
            temperature_celsius: 27.3,
            humidity_percent: 64.0,
        };
        let app =
            test::init_service(App::new().app_data(app_data(Some(sample))).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/weather/?lat=12.97&lon=77.59")
            .to_request();

        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"temperature": 27.3, "humidity": 64.0}));
    }

    #[actix_web::test]
    async fn weather_upstream_failure_is_bad_gateway() {
        let app = test::init_service(App::new().app_data(app_data(None)).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/weather/?lat=12.97&lon=77.59")
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[actix_web::test]
    async fn weather_rejects_bad_coordinates() {
        let app = test::init_service(App::new().app_data(app_data(None)).configure(configure)).await;
        for uri in &[
            "/api/weather/?lat=91&lon=0",
            "/api/weather/?lat=north&lon=0",
            "/api/weather/?lon=0",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
    }

    #[actix_web::test]
    async fn unknown_api_path_is_not_found() {
        let app = test::init_service(App::new().app_data(app_data(None)).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/login").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
