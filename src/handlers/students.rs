use crate::auth::token::authenticate;
use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::handlers::{parse_id, MessageResponse};
use crate::models::student::{Student, StudentPayload};
use crate::utils::time::current_timestamp;
use crate::validation::fields::{parse_course, required, required_str};
use crate::wal::wal::WalOperation;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

/// Create a student
///
/// POST /api/students (bearer token required)
pub async fn create_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<StudentPayload>,
) -> Result<Response, ApiError> {
    authenticate(&headers, &state.config.auth)?;

    let name = required_str(payload.name, "name")?;
    let email = required_str(payload.email, "email")?;
    let course = parse_course(&required_str(payload.course, "course")?)?;
    let year = required(payload.year, "year")?;

    if state.student_store.email_exists(&email, None) {
        warn!(email = %email, "Duplicate student email");
        return Err(ApiError::Duplicate(format!(
            "Student already exists with email {}",
            email
        )));
    }

    let student = Student::new(name, email, course, year, current_timestamp());
    state.student_store.insert(student.clone());

    if let Err(e) = state.wal.log_operation(WalOperation::PutStudent {
        student: student.clone(),
    }) {
        warn!(error = %e, "Failed to log student create to WAL");
        // Continue anyway - store is updated
    }

    state.metrics.increment_created();

    info!(id = %student.id, email = %student.email, "Student created");

    Ok((StatusCode::CREATED, Json(student)).into_response())
}

/// List all students
///
/// GET /api/students (bearer token required)
pub async fn list_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    authenticate(&headers, &state.config.auth)?;

    Ok(Json(state.student_store.list()).into_response())
}

/// Update a student, merging only the supplied fields
///
/// PUT /api/students/{id} (bearer token required)
pub async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<StudentPayload>,
) -> Result<Response, ApiError> {
    authenticate(&headers, &state.config.auth)?;

    let id = parse_id(&id)?;

    // Validate supplied fields before touching the store
    let course = match payload.course.as_deref() {
        Some(value) => Some(parse_course(value)?),
        None => None,
    };
    if let Some(email) = payload.email.as_deref() {
        if state.student_store.email_exists(email, Some(id)) {
            return Err(ApiError::Duplicate(format!(
                "Student already exists with email {}",
                email
            )));
        }
    }

    let updated = state
        .student_store
        .update(id, |student| {
            if let Some(name) = payload.name {
                student.name = name;
            }
            if let Some(email) = payload.email {
                student.email = email;
            }
            if let Some(course) = course {
                student.course = course;
            }
            if let Some(year) = payload.year {
                student.year = year;
            }
            student.updated_at = current_timestamp();
        })
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    if let Err(e) = state.wal.log_operation(WalOperation::PutStudent {
        student: updated.clone(),
    }) {
        warn!(error = %e, "Failed to log student update to WAL");
    }

    state.metrics.increment_updated();

    info!(id = %updated.id, "Student updated");

    Ok(Json(updated).into_response())
}

/// Delete a student
///
/// DELETE /api/students/{id} (bearer token required)
pub async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    authenticate(&headers, &state.config.auth)?;

    let id = parse_id(&id)?;

    let student = state
        .student_store
        .remove(id)
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    if let Err(e) = state.wal.log_operation(WalOperation::RemoveStudent { id }) {
        warn!(error = %e, "Failed to log student delete to WAL");
    }

    state.metrics.increment_deleted();

    info!(id = %student.id, email = %student.email, "Student deleted");

    Ok(Json(MessageResponse {
        message: "Student deleted successfully".to_string(),
    })
    .into_response())
}
