use futures::future::{FutureExt, LocalBoxFuture};
use seed::browser::fetch::{self, FetchError, Method, Request};
use seed::window;
use serde::de::DeserializeOwned;
use shared::lookup::{LocationProvider, RecommendationService, WeatherSource};
use shared::{Coordinate, FormValues, LookupError, Recommendation, WeatherQuery, WeatherSample};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

const GEOLOCATION_TIMEOUT_MS: u32 = 10_000;
const GEOLOCATION_MAX_AGE_MS: u32 = 5 * 60 * 1000;

// PositionError codes
const PERMISSION_DENIED: f64 = 1.0;
const TIMEOUT: f64 = 3.0;

/// `navigator.geolocation` of the current window.
pub struct BrowserLocation;

impl LocationProvider for BrowserLocation {
    fn resolve_coordinate(&self) -> LocalBoxFuture<'static, Result<Coordinate, LookupError>> {
        current_position().boxed_local()
    }
}

async fn current_position() -> Result<Coordinate, LookupError> {
    let navigator = window().navigator();
    if !js_sys::Reflect::has(&navigator, &JsValue::from_str("geolocation")).unwrap_or(false) {
        return Err(LookupError::GeolocationUnavailable);
    }
    let geolocation = navigator
        .geolocation()
        .map_err(|_| LookupError::GeolocationUnavailable)?;

    let mut options = web_sys::PositionOptions::new();
    options
        .enable_high_accuracy(false)
        .timeout(GEOLOCATION_TIMEOUT_MS)
        .maximum_age(GEOLOCATION_MAX_AGE_MS);

    // the success and error callbacks settle the promise directly
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        if let Err(err) = geolocation.get_current_position_with_error_callback_and_options(
            &resolve,
            Some(&reject),
            &options,
        ) {
            let _ = reject.call1(&JsValue::NULL, &err);
        }
    });

    let position = JsFuture::from(promise)
        .await
        .map_err(|err| position_error(&err))?;
    let coords = position.unchecked_into::<web_sys::Position>().coords();

    Ok(Coordinate {
        latitude: coords.latitude(),
        longitude: coords.longitude(),
    })
}

fn position_error(err: &JsValue) -> LookupError {
    let code = js_sys::Reflect::get(err, &JsValue::from_str("code"))
        .ok()
        .and_then(|code| code.as_f64());
    match code {
        Some(code) if code == PERMISSION_DENIED => LookupError::GeolocationDenied,
        Some(code) if code == TIMEOUT => LookupError::GeolocationTimeout,
        _ => LookupError::GeolocationUnavailable,
    }
}

/// The recommendation and weather endpoints, served from the same origin.
pub struct Api;

impl WeatherSource for Api {
    fn fetch_weather(
        &self,
        coordinate: Coordinate,
    ) -> LocalBoxFuture<'static, Result<WeatherSample, LookupError>> {
        let url = WeatherQuery::from(coordinate).url();
        async move { fetch_json::<WeatherSample>(Request::new(url)).await }.boxed_local()
    }
}

impl RecommendationService for Api {
    fn recommend(&self, values: FormValues) -> LocalBoxFuture<'static, Result<String, LookupError>> {
        async move {
            let request = Request::new(shared::RECOMMEND_PATH)
                .method(Method::Post)
                .json(&values)
                .map_err(lookup_error)?;
            let body = fetch_json::<Recommendation>(request).await?;
            Ok(body.recommended_crop)
        }
        .boxed_local()
    }
}

async fn fetch_json<T: DeserializeOwned + 'static>(request: Request<'_>) -> Result<T, LookupError> {
    let response = request
        .fetch()
        .await
        .and_then(fetch::Response::check_status)
        .map_err(lookup_error)?;
    response.json::<T>().await.map_err(lookup_error)
}

fn lookup_error(err: FetchError) -> LookupError {
    match err {
        FetchError::NetworkError(_) => LookupError::Network(format!("{:?}", err)),
        _ => LookupError::Service(format!("{:?}", err)),
    }
}
