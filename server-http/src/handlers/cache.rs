use crate::api::requests::{GetCacheParams, SetCacheBody};
use crate::api::responses::{ApiError, MessageResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::header::{HeaderName, CACHE_CONTROL};
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use tracing::info;

static X_CACHE_TTL: HeaderName = HeaderName::from_static("x-cache-ttl");

/// GET /api/cache?key=<k>
///
/// Responds with the stored value as a JSON string, plus the advisory
/// cache headers rendered from the hit.
pub async fn get_cache(
    State(state): State<AppState>,
    Query(params): Query<GetCacheParams>,
) -> Result<impl IntoResponse, ApiError> {
    let key = params.key.as_deref().unwrap_or("");
    info!(key, "GET /api/cache");

    let hit = state.cache_access.get(key).await?;

    Ok((
        AppendHeaders([
            (CACHE_CONTROL, hit.cache_control()),
            (X_CACHE_TTL.clone(), hit.ttl_header()),
        ]),
        Json(hit.value),
    ))
}

/// POST /api/cache
pub async fn set_cache(
    State(state): State<AppState>,
    body: Result<Json<SetCacheBody>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(body) = body?;
    info!(key = %body.key, "POST /api/cache");

    state
        .cache_access
        .set(&body.key, &body.value, body.ttl.as_deref())
        .await?;

    Ok(Json(MessageResponse {
        message: "cached".to_string(),
    }))
}
