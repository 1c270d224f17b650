use crate::outcome::RecommendationOutcome;
use crate::session::Session;

pub const SUBMIT_LABEL: &str = "Get Recommendation";
pub const SUBMIT_BUSY_LABEL: &str = "Getting Recommendation...";
pub const AUTOFILL_LABEL: &str = "Use My Location";
pub const AUTOFILL_BUSY_LABEL: &str = "Detecting Weather...";

/// What the page should show for a given session. Carries no state of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState<'a> {
    pub result: Option<String>,
    pub error: Option<&'a str>,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
    pub autofill_label: &'static str,
    pub autofill_disabled: bool,
    pub navbar_temperature: Option<String>,
}

pub fn project(session: &Session) -> ViewState<'_> {
    let outcome = session.outcome();
    let pending = outcome.is_pending();

    let result = match outcome {
        RecommendationOutcome::Success(crop) => Some(format!("Recommended Crop: {}", crop)),
        _ => None,
    };
    // begin_autofill clears a submit failure, begin_submit clears the weather message
    let error = outcome.failure().or_else(|| session.weather_error());
    let autofilling = session.autofill_in_flight();

    ViewState {
        result,
        error: if pending { None } else { error },
        submit_label: if pending { SUBMIT_BUSY_LABEL } else { SUBMIT_LABEL },
        submit_disabled: pending,
        autofill_label: if autofilling {
            AUTOFILL_BUSY_LABEL
        } else {
            AUTOFILL_LABEL
        },
        autofill_disabled: autofilling,
        navbar_temperature: session
            .navbar_temperature()
            .map(|degrees| format!("{}°C", degrees)),
    }
}
