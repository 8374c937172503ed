//! HTTP request handlers.

use super::AppState;
use crate::collector::render;
use crate::nodeping::CheckSource;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse},
};

const INDEX_PAGE: &str = r#"<html>
<head><title>NodePing Exporter</title></head>
<body>
<h1>NodePing Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
</body>
</html>"#;

pub async fn handle_index() -> impl IntoResponse {
    Html(INDEX_PAGE)
}

/// Liveness only; never touches the NodePing API.
pub async fn handle_healthz() -> impl IntoResponse {
    "ok"
}

/// Run one scrape and render it.
///
/// Upstream failures only show up in the failed scrape counter; the response
/// is 200 as long as the metrics can be encoded.
pub async fn handle_metrics<S: CheckSource + 'static>(
    State(state): State<AppState<S>>,
) -> impl IntoResponse {
    let families = state.exporter.collect().await;

    match render(&families) {
        Ok(body) => ([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response(),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
