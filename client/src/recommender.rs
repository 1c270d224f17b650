use seed::{self, prelude::*, *};
use shared::flow::FlowId;
use shared::lookup::{lookup_weather, RecommendationService};
use shared::projection::{project, ViewState};
use shared::{Field, LookupError, Session, WeatherSample};

use crate::platform::{Api, BrowserLocation};

#[derive(Default)]
pub struct Model {
    pub session: Session,
}

pub enum Msg {
    FieldChanged(Field, String),
    AutofillRequested,
    AutofillResolved(FlowId, Result<WeatherSample, LookupError>),
    ProbeResolved(FlowId, Result<WeatherSample, LookupError>),
    SubmitRequested,
    SubmitResolved(FlowId, Result<String, LookupError>),
    PageLeaving,
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::FieldChanged(field, value) => {
            model.session.set_field(field, value);
        }

        Msg::AutofillRequested => {
            let id = model.session.begin_autofill();
            orders.perform_cmd(async move { Msg::AutofillResolved(id, weather_lookup().await) });
        }

        Msg::AutofillResolved(id, result) => {
            if let Err(err) = &result {
                log!("weather autofill failed:", err);
            }
            if !model.session.complete_autofill(id, result) {
                orders.skip();
            }
        }

        Msg::ProbeResolved(id, result) => {
            if !model.session.complete_probe(id, result) {
                orders.skip();
            }
        }

        Msg::SubmitRequested => {
            let (id, values) = model.session.begin_submit();
            orders.perform_cmd(async move { Msg::SubmitResolved(id, Api.recommend(values).await) });
        }

        Msg::SubmitResolved(id, result) => {
            if let Err(err) = &result {
                error!("recommendation request failed:", err);
            }
            if !model.session.complete_submit(id, result) {
                orders.skip();
            }
        }

        Msg::PageLeaving => {
            model.session.abandon_flows();
            orders.skip();
        }
    }
}

pub async fn weather_lookup() -> Result<WeatherSample, LookupError> {
    lookup_weather(&BrowserLocation, &Api).await
}

pub fn view(model: &Model) -> Vec<Node<Msg>> {
    let state = project(&model.session);
    nodes![
        nav_bar(&state),
        div![
            attrs! {At::Class => "app-header"},
            h1!["AI Crop Recommendation System 🌾"],
            p!["Enter the soil and weather conditions to get a crop recommendation."],
            form![
                attrs! {At::Class => "crop-form"},
                ev(Ev::Submit, |event| {
                    event.prevent_default();
                    Msg::SubmitRequested
                }),
                div![
                    attrs! {At::Class => "form-grid"},
                    Field::ALL
                        .iter()
                        .map(|field| field_input(*field, model.session.form().get(*field))),
                ],
                button![
                    attrs! {
                        At::Type => "button",
                        At::Class => "btn btn-secondary",
                        At::Disabled => state.autofill_disabled.as_at_value()
                    },
                    ev(Ev::Click, |_| Msg::AutofillRequested),
                    state.autofill_label,
                ],
                button![
                    attrs! {
                        At::Type => "submit",
                        At::Class => "btn btn-primary",
                        At::Disabled => state.submit_disabled.as_at_value()
                    },
                    state.submit_label,
                ],
            ],
            state
                .result
                .as_ref()
                .map(|result| h2![attrs! {At::Class => "result"}, result.as_str()]),
            state
                .error
                .map(|error| p![attrs! {At::Class => "error"}, error]),
        ]
    ]
}

fn field_input(field: Field, value: &str) -> Node<Msg> {
    input![
        input_ev(Ev::Input, move |value| Msg::FieldChanged(field, value)),
        attrs! {
            At::Type => "number",
            At::Name => field.wire_name(),
            At::Step => field.step(),
            At::Value => value,
            At::Placeholder => field.placeholder(),
            At::Required => AtValue::None
        },
    ]
}

fn nav_bar(state: &ViewState) -> Node<Msg> {
    nav![
        attrs! {At::Class => "navbar navbar-light bg-white border rounded-top mt-1"},
        a!["Crop Advisor", attrs! {At::Class => "navbar-brand"}],
        state.navbar_temperature.as_ref().map(|temperature| {
            span![
                attrs! {At::Class => "navbar-text"},
                temperature.as_str()
            ]
        }),
    ]
}
