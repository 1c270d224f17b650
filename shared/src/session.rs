use crate::flow::{FlowId, FlowTracker};
use crate::form::{Field, FormValues};
use crate::lookup::{lookup_weather, LocationProvider, LookupError, RecommendationService, WeatherSample, WeatherSource};
use crate::outcome::{RecommendationOutcome, RECOMMENDATION_FAILED};

pub const LOCATION_NOT_ENABLED: &str =
    "Location access is not enabled. Allow location access or enter temperature and humidity manually.";
pub const WEATHER_UNAVAILABLE: &str =
    "Could not fetch weather data. Please enter temperature and humidity manually.";

/// Everything the page knows about the current visit.
///
/// Each flow is split into a `begin_*` and a `complete_*` half so the
/// caller can keep handling input while a request is out. Completions carry
/// the `FlowId` they were started with and are dropped when a newer flow
/// has started since.
#[derive(Debug, Default)]
pub struct Session {
    form: FormValues,
    outcome: RecommendationOutcome,
    weather_error: Option<String>,
    navbar_temperature: Option<i32>,
    submits: FlowTracker,
    autofills: FlowTracker,
    probes: FlowTracker,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormValues {
        &self.form
    }

    pub fn outcome(&self) -> &RecommendationOutcome {
        &self.outcome
    }

    /// Message left by the last failed autofill, if any.
    pub fn weather_error(&self) -> Option<&str> {
        self.weather_error.as_deref()
    }

    pub fn navbar_temperature(&self) -> Option<i32> {
        self.navbar_temperature
    }

    pub fn autofill_in_flight(&self) -> bool {
        self.autofills.in_flight()
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    // ---- submit ----

    /// Moves to `Pending` and returns the values to send.
    pub fn begin_submit(&mut self) -> (FlowId, FormValues) {
        let id = self.submits.begin();
        self.outcome = RecommendationOutcome::Pending;
        self.weather_error = None;
        (id, self.form.clone())
    }

    /// Applies a submission result. Returns false if `id` was superseded.
    pub fn complete_submit(&mut self, id: FlowId, result: Result<String, LookupError>) -> bool {
        if !self.submits.finish(id) {
            tracing::debug!("dropping result of superseded submit {:?}", id);
            return false;
        }
        self.outcome = match result {
            Ok(crop) => RecommendationOutcome::Success(crop),
            Err(err) => {
                tracing::debug!("recommendation failed: {}", err);
                RecommendationOutcome::Failure(RECOMMENDATION_FAILED.to_string())
            }
        };
        true
    }

    pub async fn submit<S>(&mut self, service: &S)
    where
        S: RecommendationService + ?Sized,
    {
        let (id, values) = self.begin_submit();
        let result = service.recommend(values).await;
        self.complete_submit(id, result);
    }

    // ---- weather autofill ----

    /// Clears any earlier error so the autofill result is what the user sees.
    pub fn begin_autofill(&mut self) -> FlowId {
        self.weather_error = None;
        if self.outcome.failure().is_some() {
            self.outcome = RecommendationOutcome::Idle;
        }
        self.autofills.begin()
    }

    /// On success writes the rounded temperature and humidity into the form;
    /// on failure leaves the form alone and records a message.
    pub fn complete_autofill(
        &mut self,
        id: FlowId,
        result: Result<WeatherSample, LookupError>,
    ) -> bool {
        if !self.autofills.finish(id) {
            tracing::debug!("dropping result of superseded autofill {:?}", id);
            return false;
        }
        match result {
            Ok(sample) => self.form.set_fields(vec![
                (Field::Temperature, format!("{:.1}", sample.temperature_celsius)),
                (Field::Humidity, format!("{:.1}", sample.humidity_percent)),
            ]),
            Err(err) => {
                tracing::debug!("autofill failed: {}", err);
                let message = if err.is_location() {
                    LOCATION_NOT_ENABLED
                } else {
                    WEATHER_UNAVAILABLE
                };
                self.weather_error = Some(message.to_string());
            }
        }
        true
    }

    pub async fn autofill<L, W>(&mut self, location: &L, weather: &W)
    where
        L: LocationProvider + ?Sized,
        W: WeatherSource + ?Sized,
    {
        let id = self.begin_autofill();
        let result = lookup_weather(location, weather).await;
        self.complete_autofill(id, result);
    }

    // ---- navbar probe ----

    pub fn begin_probe(&mut self) -> FlowId {
        self.probes.begin()
    }

    /// Shows the ambient temperature in the navbar. Failures are ignored and
    /// never reach the form or the error channels.
    pub fn complete_probe(&mut self, id: FlowId, result: Result<WeatherSample, LookupError>) -> bool {
        if !self.probes.finish(id) {
            tracing::debug!("dropping result of abandoned probe {:?}", id);
            return false;
        }
        match result {
            Ok(sample) => self.navbar_temperature = Some(sample.temperature_celsius.round() as i32),
            Err(err) => tracing::debug!("navbar temperature unavailable: {}", err),
        }
        true
    }

    pub async fn probe<L, W>(&mut self, location: &L, weather: &W)
    where
        L: LocationProvider + ?Sized,
        W: WeatherSource + ?Sized,
    {
        let id = self.begin_probe();
        let result = lookup_weather(location, weather).await;
        self.complete_probe(id, result);
    }

    /// Forgets every in-flight flow, e.g. when the page is being left.
    /// A pending submission goes back to `Idle`.
    pub fn abandon_flows(&mut self) {
        self.submits.abandon();
        self.autofills.abandon();
        self.probes.abandon();
        if self.outcome.is_pending() {
            self.outcome = RecommendationOutcome::Idle;
        }
    }
}
