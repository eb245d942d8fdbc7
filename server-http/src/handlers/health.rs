use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::warn;

/// GET /api/health
///
/// Liveness probe: pings the backing store with a short bounded timeout.
/// An unreachable store reports unhealthy, never crashes the process.
pub async fn health_check(State(state): State<AppState>) -> Response {
    match state.cache_access.health().await {
        Ok(()) => (StatusCode::OK, "OK").into_response(),
        Err(err) => {
            warn!(error = %err, "health probe failed");
            (StatusCode::SERVICE_UNAVAILABLE, "cache backend unreachable").into_response()
        }
    }
}
