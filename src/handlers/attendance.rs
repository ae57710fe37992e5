use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::grading;
use crate::handlers::{parse_id, MessageResponse};
use crate::models::attendance::{
    AttendancePayload, AttendanceCountsPayload, AttendanceRecord, BulkAttendancePayload,
};
use crate::models::subject::SubjectKey;
use crate::summary;
use crate::summary::attendance::AttendanceSummary;
use crate::utils::time::current_timestamp;
use crate::validation::fields::{parse_course, required, required_str};
use crate::wal::wal::WalOperation;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Serialize, Deserialize)]
pub struct AttendanceResponse {
    pub message: String,
    pub attendance: AttendanceRecord,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkAttendanceResponse {
    pub message: String,
    pub records: Vec<AttendanceRecord>,
}

/// Create or overwrite the record for (studentId, subject, semester).
/// Last write wins; the percentage is recomputed from the submitted counts.
///
/// POST /api/attendance
pub async fn upsert_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AttendancePayload>,
) -> Result<Response, ApiError> {
    let student_id = required_str(payload.student_id, "studentId")?;
    let student_name = required_str(payload.student_name, "studentName")?;
    let course = parse_course(&required_str(payload.course, "course")?)?;
    let year = required(payload.year, "year")?;
    let semester = required(payload.semester, "semester")?;
    let subject = required_str(payload.subject, "subject")?;
    let subject_code = required_str(payload.subject_code, "subjectCode")?;
    let total_classes = required(payload.total_classes, "totalClasses")?;
    let attended_classes = required(payload.attended_classes, "attendedClasses")?;

    let now = current_timestamp();
    let key = SubjectKey::new(student_id.clone(), subject.clone(), semester);

    let (record, created) = state.attendance_store.upsert(key, |existing| match existing {
        Some(existing) => {
            let mut updated = existing.clone();
            updated.total_classes = total_classes;
            updated.attended_classes = attended_classes;
            grading::attendance::recompute(&mut updated, now);
            updated
        }
        None => {
            let mut record = AttendanceRecord::new(
                student_id,
                student_name,
                course,
                year,
                semester,
                subject,
                subject_code,
                total_classes,
                attended_classes,
                now,
            );
            grading::attendance::recompute(&mut record, now);
            record
        }
    });

    if let Err(e) = state.wal.log_operation(WalOperation::PutAttendance {
        record: record.clone(),
    }) {
        warn!(error = %e, "Failed to log attendance upsert to WAL");
        // Continue anyway - store is updated
    }

    info!(
        id = %record.id,
        student_id = %record.student_id,
        subject = %record.subject,
        percentage = record.attendance_percentage,
        created = created,
        "Attendance record saved"
    );

    if created {
        state.metrics.increment_created();
        Ok((
            StatusCode::CREATED,
            Json(AttendanceResponse {
                message: "Attendance record created successfully".to_string(),
                attendance: record,
            }),
        )
            .into_response())
    } else {
        state.metrics.increment_updated();
        Ok(Json(AttendanceResponse {
            message: "Attendance updated successfully".to_string(),
            attendance: record,
        })
        .into_response())
    }
}

/// List every attendance record
///
/// GET /api/attendance
pub async fn list_handler(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    Ok(Json(state.attendance_store.list()).into_response())
}

/// One student's records
///
/// GET /api/attendance/student/{student_id}
pub async fn by_student_handler(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
) -> Result<Response, ApiError> {
    let records = state.attendance_store.by_student(&student_id);

    if records.is_empty() {
        return Err(ApiError::NotFound(
            "No attendance records found for this student".to_string(),
        ));
    }

    Ok(Json(records).into_response())
}

/// Records filtered by course and year
///
/// GET /api/attendance/course/{course}/year/{year}
pub async fn by_course_year_handler(
    State(state): State<Arc<AppState>>,
    Path((course, year)): Path<(String, u32)>,
) -> Result<Response, ApiError> {
    let course = parse_course(&course)?;

    Ok(Json(state.attendance_store.by_course_year(course, year)).into_response())
}

/// Overwrite the class counts of one record by id
///
/// PUT /api/attendance/{id}
pub async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<AttendanceCountsPayload>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let total_classes = required(payload.total_classes, "totalClasses")?;
    let attended_classes = required(payload.attended_classes, "attendedClasses")?;

    let now = current_timestamp();

    let record = state
        .attendance_store
        .update_by_id(id, |record| {
            record.total_classes = total_classes;
            record.attended_classes = attended_classes;
            grading::attendance::recompute(record, now);
        })
        .ok_or_else(|| ApiError::NotFound("Attendance record not found".to_string()))?;

    if let Err(e) = state.wal.log_operation(WalOperation::PutAttendance {
        record: record.clone(),
    }) {
        warn!(error = %e, "Failed to log attendance update to WAL");
    }

    state.metrics.increment_updated();

    info!(id = %record.id, percentage = record.attendance_percentage, "Attendance record updated");

    Ok(Json(AttendanceResponse {
        message: "Attendance updated successfully".to_string(),
        attendance: record,
    })
    .into_response())
}

/// Delete one record by id
///
/// DELETE /api/attendance/{id}
pub async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;

    let record = state
        .attendance_store
        .remove_by_id(id)
        .ok_or_else(|| ApiError::NotFound("Attendance record not found".to_string()))?;

    if let Err(e) = state
        .wal
        .log_operation(WalOperation::RemoveAttendance { id })
    {
        warn!(error = %e, "Failed to log attendance delete to WAL");
    }

    state.metrics.increment_deleted();

    info!(id = %record.id, student_id = %record.student_id, "Attendance record deleted");

    Ok(Json(MessageResponse {
        message: "Attendance record deleted successfully".to_string(),
    })
    .into_response())
}

/// Seed one record per student for a subject, attended count zero
///
/// POST /api/attendance/bulk
pub async fn bulk_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BulkAttendancePayload>,
) -> Result<Response, ApiError> {
    let students = required(payload.students, "students")?;
    let subject = required_str(payload.subject, "subject")?;
    let subject_code = required_str(payload.subject_code, "subjectCode")?;
    let total_classes = required(payload.total_classes, "totalClasses")?;

    let now = current_timestamp();
    let mut records = Vec::with_capacity(students.len());

    for (index, student) in students.into_iter().enumerate() {
        let student_id = required_str(student.student_id, &format!("students[{}].studentId", index))?;
        let name = required_str(student.name, &format!("students[{}].name", index))?;
        let course = parse_course(&required_str(
            student.course,
            &format!("students[{}].course", index),
        )?)?;
        let year = required(student.year, &format!("students[{}].year", index))?;
        let semester = required(student.semester, &format!("students[{}].semester", index))?;

        let key = SubjectKey::new(student_id.clone(), subject.clone(), semester);
        let subject = subject.clone();
        let subject_code = subject_code.clone();

        let (record, created) = state.attendance_store.upsert(key, |existing| match existing {
            Some(existing) => {
                let mut updated = existing.clone();
                updated.total_classes = total_classes;
                updated.attended_classes = 0;
                grading::attendance::recompute(&mut updated, now);
                updated
            }
            None => {
                let mut record = AttendanceRecord::new(
                    student_id,
                    name,
                    course,
                    year,
                    semester,
                    subject,
                    subject_code,
                    total_classes,
                    0,
                    now,
                );
                grading::attendance::recompute(&mut record, now);
                record
            }
        });

        if let Err(e) = state.wal.log_operation(WalOperation::PutAttendance {
            record: record.clone(),
        }) {
            warn!(error = %e, "Failed to log bulk attendance record to WAL");
        }

        if created {
            state.metrics.increment_created();
        } else {
            state.metrics.increment_updated();
        }

        records.push(record);
    }

    info!(count = records.len(), "Bulk attendance records created");

    Ok((
        StatusCode::CREATED,
        Json(BulkAttendanceResponse {
            message: format!("{} attendance records created successfully", records.len()),
            records,
        }),
    )
        .into_response())
}

/// Per-student dashboard summary
///
/// GET /api/attendance/summary/{student_id}
pub async fn summary_handler(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
) -> Result<Response, ApiError> {
    let records = state.attendance_store.by_student(&student_id);
    let summary: AttendanceSummary = summary::attendance::summarize(records);

    Ok(Json(summary).into_response())
}
