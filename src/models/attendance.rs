use crate::models::subject::{Course, SubjectKey};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-subject attendance counts for one student and term.
/// `attendance_percentage` is derived; the write path recomputes it from the
/// raw counts before every persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub student_id: String,
    pub student_name: String,
    pub course: Course,
    pub year: u32,
    pub semester: u32,
    pub subject: String,
    pub subject_code: String,
    pub total_classes: u32,
    pub attended_classes: u32,
    pub attendance_percentage: f64,
    pub last_updated: i64,
    pub created_at: i64,
}

impl AttendanceRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        student_id: String,
        student_name: String,
        course: Course,
        year: u32,
        semester: u32,
        subject: String,
        subject_code: String,
        total_classes: u32,
        attended_classes: u32,
        now: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            student_id,
            student_name,
            course,
            year,
            semester,
            subject,
            subject_code,
            total_classes,
            attended_classes,
            attendance_percentage: 0.0,
            last_updated: now,
            created_at: now,
        }
    }

    pub fn key(&self) -> SubjectKey {
        SubjectKey::new(self.student_id.clone(), self.subject.clone(), self.semester)
    }
}

/// Body of POST /api/attendance
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendancePayload {
    pub student_id: Option<String>,
    pub student_name: Option<String>,
    pub course: Option<String>,
    pub year: Option<u32>,
    pub semester: Option<u32>,
    pub subject: Option<String>,
    pub subject_code: Option<String>,
    pub total_classes: Option<u32>,
    pub attended_classes: Option<u32>,
}

/// Body of PUT /api/attendance/{id}
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceCountsPayload {
    pub total_classes: Option<u32>,
    pub attended_classes: Option<u32>,
}

/// One roster entry inside a bulk request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkStudent {
    pub student_id: Option<String>,
    pub name: Option<String>,
    pub course: Option<String>,
    pub year: Option<u32>,
    pub semester: Option<u32>,
}

/// Body of POST /api/attendance/bulk: seeds one record per student with zero
/// attended classes
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAttendancePayload {
    pub students: Option<Vec<BulkStudent>>,
    pub subject: Option<String>,
    pub subject_code: Option<String>,
    pub total_classes: Option<u32>,
}
