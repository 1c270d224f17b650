use seed::{prelude::*, *};

mod platform;
mod recommender;

// ------ ------
//     Init
// ------ ------

fn init(_: Url, orders: &mut impl Orders<Msg>) -> Model {
    let mut model = Model::default();
    let probe = model.recommender.session.begin_probe();
    orders
        .proxy(Msg::Recommender)
        .perform_cmd(async move {
            recommender::Msg::ProbeResolved(probe, recommender::weather_lookup().await)
        })
        .stream(streams::window_event(Ev::from("pagehide"), |_| {
            recommender::Msg::PageLeaving
        }));
    model
}

// ------ ------
//     Model
// ------ ------

#[derive(Default)]
struct Model {
    recommender: recommender::Model,
}

// ------ ------
//    Update
// ------ ------

enum Msg {
    Recommender(recommender::Msg),
}

fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::Recommender(msg) => {
            recommender::update(
                msg,
                &mut model.recommender,
                &mut orders.proxy(Msg::Recommender),
            );
        }
    }
}

// ------ ------
//     View
// ------ ------

fn view(model: &Model) -> impl IntoNodes<Msg> {
    div![
        style! {
            St::FontFamily => "sans-serif";
            St::MaxWidth => px(650);
            St::Margin => "auto";
        },
        recommender::view(&model.recommender).map_msg(Msg::Recommender),
    ]
}

// ------ ------
//     Start
// ------ ------

#[wasm_bindgen(start)]
pub fn start() {
    App::start("app", init, update, view);
}
