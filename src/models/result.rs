use crate::models::subject::{Course, SubjectKey};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    C,
    D,
    F,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassStatus {
    Pass,
    Fail,
}

/// One midterm: raw marks plus the derived percentage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MidtermMarks {
    pub marks_obtained: f64,
    pub total_marks: f64,
    pub percentage: f64,
}

impl Default for MidtermMarks {
    fn default() -> Self {
        Self {
            marks_obtained: 0.0,
            total_marks: 50.0,
            percentage: 0.0,
        }
    }
}

/// Aggregate over both midterms; `total_marks` is fixed at 100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalMarks {
    pub marks_obtained: f64,
    pub total_marks: f64,
    pub percentage: f64,
}

impl Default for TotalMarks {
    fn default() -> Self {
        Self {
            marks_obtained: 0.0,
            total_marks: 100.0,
            percentage: 0.0,
        }
    }
}

/// Exam results for one student, subject and term. `total`, `grade` and
/// `status` are derived; the write path recomputes them from the raw midterm
/// marks on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub id: Uuid,
    pub student_id: String,
    pub student_name: String,
    pub course: Course,
    pub year: u32,
    pub semester: u32,
    pub subject: String,
    pub subject_code: String,
    pub mid1: MidtermMarks,
    pub mid2: MidtermMarks,
    pub total: TotalMarks,
    pub grade: Grade,
    pub status: PassStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ResultRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        student_id: String,
        student_name: String,
        course: Course,
        year: u32,
        semester: u32,
        subject: String,
        subject_code: String,
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
            mid1: MidtermMarks::default(),
            mid2: MidtermMarks::default(),
            total: TotalMarks::default(),
            grade: Grade::F,
            status: PassStatus::Fail,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn key(&self) -> SubjectKey {
        SubjectKey::new(self.student_id.clone(), self.subject.clone(), self.semester)
    }
}

/// Supplied midterm fields; anything missing keeps its prior value
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MidtermPayload {
    pub marks_obtained: Option<f64>,
    pub total_marks: Option<f64>,
}

/// Body of POST /api/results
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPayload {
    pub student_id: Option<String>,
    pub student_name: Option<String>,
    pub course: Option<String>,
    pub year: Option<u32>,
    pub semester: Option<u32>,
    pub subject: Option<String>,
    pub subject_code: Option<String>,
    pub mid1: Option<MidtermPayload>,
    pub mid2: Option<MidtermPayload>,
}

/// Body of PUT /api/results/{id}
#[derive(Debug, Default, Deserialize)]
pub struct ResultMarksPayload {
    pub mid1: Option<MidtermPayload>,
    pub mid2: Option<MidtermPayload>,
}

/// Body of POST /api/results/bulk: seeds one zero-mark record per student
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkResultPayload {
    pub students: Option<Vec<crate::models::attendance::BulkStudent>>,
    pub subject: Option<String>,
    pub subject_code: Option<String>,
}
