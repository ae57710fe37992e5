use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::grading;
use crate::handlers::{parse_id, MessageResponse};
use crate::models::result::{
    BulkResultPayload, MidtermMarks, MidtermPayload, ResultMarksPayload, ResultPayload,
    ResultRecord,
};
use crate::models::subject::SubjectKey;
use crate::summary;
use crate::summary::results::ResultSummary;
use crate::summary::subjects::SubjectStatistics;
use crate::utils::time::current_timestamp;
use crate::validation::fields::{check_midterm, parse_course, required, required_str};
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
pub struct ResultResponse {
    pub message: String,
    pub result: ResultRecord,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkResultResponse {
    pub message: String,
    pub records: Vec<ResultRecord>,
}

/// Overwrite a midterm's raw fields with whatever the caller supplied
fn apply_midterm(marks: &mut MidtermMarks, payload: &MidtermPayload) {
    if let Some(value) = payload.marks_obtained {
        marks.marks_obtained = value;
    }
    if let Some(value) = payload.total_marks {
        marks.total_marks = value;
    }
}

/// Create or merge the record for (studentId, subject, semester).
/// Only supplied mid1/mid2 fields overwrite prior values; grade, status and
/// percentages are recomputed after the merge.
///
/// POST /api/results
pub async fn upsert_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ResultPayload>,
) -> Result<Response, ApiError> {
    let student_id = required_str(payload.student_id, "studentId")?;
    let student_name = required_str(payload.student_name, "studentName")?;
    let course = parse_course(&required_str(payload.course, "course")?)?;
    let year = required(payload.year, "year")?;
    let semester = required(payload.semester, "semester")?;
    let subject = required_str(payload.subject, "subject")?;
    let subject_code = required_str(payload.subject_code, "subjectCode")?;

    let mid1 = payload.mid1.unwrap_or_default();
    let mid2 = payload.mid2.unwrap_or_default();
    check_midterm(&mid1, "mid1")?;
    check_midterm(&mid2, "mid2")?;

    let now = current_timestamp();
    let key = SubjectKey::new(student_id.clone(), subject.clone(), semester);

    let (record, created) = state.result_store.upsert(key, |existing| match existing {
        Some(existing) => {
            let mut updated = existing.clone();
            apply_midterm(&mut updated.mid1, &mid1);
            apply_midterm(&mut updated.mid2, &mid2);
            updated.updated_at = now;
            grading::results::recompute(&mut updated);
            updated
        }
        None => {
            let mut record = ResultRecord::new(
                student_id,
                student_name,
                course,
                year,
                semester,
                subject,
                subject_code,
                now,
            );
            apply_midterm(&mut record.mid1, &mid1);
            apply_midterm(&mut record.mid2, &mid2);
            grading::results::recompute(&mut record);
            record
        }
    });

    if let Err(e) = state.wal.log_operation(WalOperation::PutResult {
        record: record.clone(),
    }) {
        warn!(error = %e, "Failed to log result upsert to WAL");
        // Continue anyway - store is updated
    }

    info!(
        id = %record.id,
        student_id = %record.student_id,
        subject = %record.subject,
        percentage = record.total.percentage,
        grade = ?record.grade,
        created = created,
        "Result record saved"
    );

    if created {
        state.metrics.increment_created();
        Ok((
            StatusCode::CREATED,
            Json(ResultResponse {
                message: "Result record created successfully".to_string(),
                result: record,
            }),
        )
            .into_response())
    } else {
        state.metrics.increment_updated();
        Ok(Json(ResultResponse {
            message: "Result updated successfully".to_string(),
            result: record,
        })
        .into_response())
    }
}

/// List every result record
///
/// GET /api/results
pub async fn list_handler(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    Ok(Json(state.result_store.list()).into_response())
}

/// One student's records
///
/// GET /api/results/student/{student_id}
pub async fn by_student_handler(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
) -> Result<Response, ApiError> {
    let records = state.result_store.by_student(&student_id);

    if records.is_empty() {
        return Err(ApiError::NotFound(
            "No results found for this student".to_string(),
        ));
    }

    Ok(Json(records).into_response())
}

/// Records filtered by course and year
///
/// GET /api/results/course/{course}/year/{year}
pub async fn by_course_year_handler(
    State(state): State<Arc<AppState>>,
    Path((course, year)): Path<(String, u32)>,
) -> Result<Response, ApiError> {
    let course = parse_course(&course)?;

    Ok(Json(state.result_store.by_course_year(course, year)).into_response())
}

/// Merge supplied midterm fields into one record by id and recompute
///
/// PUT /api/results/{id}
pub async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<ResultMarksPayload>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;

    let mid1 = payload.mid1.unwrap_or_default();
    let mid2 = payload.mid2.unwrap_or_default();
    check_midterm(&mid1, "mid1")?;
    check_midterm(&mid2, "mid2")?;

    let now = current_timestamp();

    let record = state
        .result_store
        .update_by_id(id, |record| {
            apply_midterm(&mut record.mid1, &mid1);
            apply_midterm(&mut record.mid2, &mid2);
            record.updated_at = now;
            grading::results::recompute(record);
        })
        .ok_or_else(|| ApiError::NotFound("Result record not found".to_string()))?;

    if let Err(e) = state.wal.log_operation(WalOperation::PutResult {
        record: record.clone(),
    }) {
        warn!(error = %e, "Failed to log result update to WAL");
    }

    state.metrics.increment_updated();

    info!(
        id = %record.id,
        percentage = record.total.percentage,
        grade = ?record.grade,
        "Result record updated"
    );

    Ok(Json(ResultResponse {
        message: "Result updated successfully".to_string(),
        result: record,
    })
    .into_response())
}

/// Delete one record by id
///
/// DELETE /api/results/{id}
pub async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;

    let record = state
        .result_store
        .remove_by_id(id)
        .ok_or_else(|| ApiError::NotFound("Result record not found".to_string()))?;

    if let Err(e) = state.wal.log_operation(WalOperation::RemoveResult { id }) {
        warn!(error = %e, "Failed to log result delete to WAL");
    }

    state.metrics.increment_deleted();

    info!(id = %record.id, student_id = %record.student_id, "Result record deleted");

    Ok(Json(MessageResponse {
        message: "Result record deleted successfully".to_string(),
    })
    .into_response())
}

/// Seed one zero-mark record per student for a subject
///
/// POST /api/results/bulk
pub async fn bulk_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BulkResultPayload>,
) -> Result<Response, ApiError> {
    let students = required(payload.students, "students")?;
    let subject = required_str(payload.subject, "subject")?;
    let subject_code = required_str(payload.subject_code, "subjectCode")?;

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

        let (record, created) = state.result_store.upsert(key, |existing| match existing {
            Some(existing) => {
                let mut updated = existing.clone();
                updated.mid1 = MidtermMarks::default();
                updated.mid2 = MidtermMarks::default();
                updated.updated_at = now;
                grading::results::recompute(&mut updated);
                updated
            }
            None => {
                let mut record = ResultRecord::new(
                    student_id,
                    name,
                    course,
                    year,
                    semester,
                    subject,
                    subject_code,
                    now,
                );
                grading::results::recompute(&mut record);
                record
            }
        });

        if let Err(e) = state.wal.log_operation(WalOperation::PutResult {
            record: record.clone(),
        }) {
            warn!(error = %e, "Failed to log bulk result record to WAL");
        }

        if created {
            state.metrics.increment_created();
        } else {
            state.metrics.increment_updated();
        }

        records.push(record);
    }

    info!(count = records.len(), "Bulk result records created");

    Ok((
        StatusCode::CREATED,
        Json(BulkResultResponse {
            message: format!("{} result records created successfully", records.len()),
            records,
        }),
    )
        .into_response())
}

/// Per-student dashboard summary
///
/// GET /api/results/summary/{student_id}
pub async fn summary_handler(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
) -> Result<Response, ApiError> {
    let records = state.result_store.by_student(&student_id);
    let summary: ResultSummary = summary::results::summarize(records);

    Ok(Json(summary).into_response())
}

/// Admin-wide statistics grouped by (subject, course, year)
///
/// GET /api/results/statistics/subjects
pub async fn statistics_handler(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let records = state.result_store.list();
    let stats: Vec<SubjectStatistics> = summary::subjects::subject_statistics(&records);

    Ok(Json(stats).into_response())
}
