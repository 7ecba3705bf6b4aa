use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use service::AppState;

use crate::controller::{asset_controller, health_check_controller, notification_controller};

/// Wires the endpoint's fixed route set. Paths match exactly; anything else
/// falls through to 404. No request body is ever read and only GET is
/// routed.
pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(asset_controller::index))
        .route("/index.html", get(asset_controller::index))
        .route("/ping", get(health_check_controller::ping))
        .route("/notifications", get(notification_controller::stream))
        .fallback(not_found)
        .with_state(app_state)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html("404 Not Found"))
}
