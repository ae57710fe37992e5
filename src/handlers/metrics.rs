// Metrics endpoint

use crate::auth::token::authenticate;
use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::user::Role;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::warn;

/// Returns JSON with service statistics: write/login counters, store sizes,
/// uptime and write rate.
///
/// Requires a bearer token with the admin role.
pub async fn metrics_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let claims = authenticate(&headers, &state.config.auth)?;

    if claims.role != Role::Admin {
        warn!(sub = %claims.sub, "Non-admin metrics access attempt");
        return Err(ApiError::Forbidden);
    }

    let snapshot = state.metrics.get_snapshot(
        &state.student_store,
        &state.user_store,
        &state.attendance_store,
        &state.result_store,
    );

    Ok((StatusCode::OK, Json(snapshot)).into_response())
}
