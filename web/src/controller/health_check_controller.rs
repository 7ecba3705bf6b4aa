use axum::http::StatusCode;
use axum::response::IntoResponse;

/// GET /ping — liveness probe. Answers regardless of queue or session
/// state; used by the startup self-check and by anything that wants to
/// confirm the endpoint is reachable.
pub(crate) async fn ping() -> impl IntoResponse {
    (StatusCode::OK, "pong")
}
