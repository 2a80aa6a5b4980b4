use axum::{
	Router,
	routing::{get, put},
};
use tower_http::trace::TraceLayer;

use crate::app::App;
use crate::settings;

pub fn init(app: App) -> Router {
	Router::new()
		.route("/api/settings", get(settings::handler::get_settings))
		.route("/api/settings", put(settings::handler::put_settings))
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

// vim: ts=4
