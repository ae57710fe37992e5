use crate::core::error::ApiError;
use axum::response::{IntoResponse, Response};

pub async fn fallback_handler() -> Response {
    ApiError::NotFound(
        "Invalid endpoint. Valid endpoints: /api/students, /api/auth, /api/attendance, /api/results, /health"
            .to_string(),
    )
    .into_response()
}
