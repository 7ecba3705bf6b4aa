use axum::response::Html;

/// The notification page shown in the consumer's browser. Embedded at build
/// time so the server binary is self-contained.
const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// GET / and GET /index.html
pub(crate) async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
