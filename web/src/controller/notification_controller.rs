use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use log::debug;
use service::AppState;
use sse::StreamSession;

/// GET /notifications — establishes a long-lived event-stream connection
/// and hands it to a new drain session. The session owns the connection
/// until the peer goes away or the server shuts down.
pub(crate) async fn stream(
    State(app_state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("Establishing event stream connection");

    let session = StreamSession::new(
        Arc::clone(app_state.queue()),
        app_state.config.poll_interval(),
    );

    Sse::new(session.into_stream()).keep_alive(KeepAlive::default())
}
