use crate::grading::attendance::LOW_ATTENDANCE_THRESHOLD;
use crate::models::attendance::AttendanceRecord;
use crate::summary::round_to_2;
use serde::{Deserialize, Serialize};

/// Per-student dashboard summary over all subject records
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub total_subjects: usize,
    pub overall_percentage: f64,
    pub low_attendance_subjects: Vec<AttendanceRecord>,
    pub good_attendance_subjects: Vec<AttendanceRecord>,
}

impl AttendanceSummary {
    /// A student with no records gets a defined zero shape, not an error
    pub fn empty() -> Self {
        Self {
            total_subjects: 0,
            overall_percentage: 0.0,
            low_attendance_subjects: Vec::new(),
            good_attendance_subjects: Vec::new(),
        }
    }
}

pub fn summarize(records: Vec<AttendanceRecord>) -> AttendanceSummary {
    if records.is_empty() {
        return AttendanceSummary::empty();
    }

    let total_subjects = records.len();
    let overall = records
        .iter()
        .map(|r| r.attendance_percentage)
        .sum::<f64>()
        / total_subjects as f64;

    let (low, good): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|r| r.attendance_percentage < LOW_ATTENDANCE_THRESHOLD);

    AttendanceSummary {
        total_subjects,
        overall_percentage: round_to_2(overall),
        low_attendance_subjects: low,
        good_attendance_subjects: good,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading;
    use crate::models::subject::Course;

    fn record(subject: &str, total: u32, attended: u32) -> AttendanceRecord {
        let mut record = AttendanceRecord::new(
            "CSE253101".to_string(),
            "Asha Rao".to_string(),
            Course::Cse,
            3,
            5,
            subject.to_string(),
            "CS301".to_string(),
            total,
            attended,
            1000,
        );
        grading::attendance::recompute(&mut record, 1000);
        record
    }

    #[test]
    fn test_empty_summary_shape() {
        let summary = summarize(Vec::new());

        assert_eq!(summary.total_subjects, 0);
        assert_eq!(summary.overall_percentage, 0.0);
        assert!(summary.low_attendance_subjects.is_empty());
        assert!(summary.good_attendance_subjects.is_empty());
    }

    #[test]
    fn test_partition_at_75() {
        let summary = summarize(vec![
            record("Networks", 20, 14),   // 70 -> low
            record("Databases", 20, 15),  // 75 -> good
            record("Compilers", 20, 19),  // 95 -> good
        ]);

        assert_eq!(summary.total_subjects, 3);
        assert_eq!(summary.overall_percentage, 80.0);
        assert_eq!(summary.low_attendance_subjects.len(), 1);
        assert_eq!(summary.low_attendance_subjects[0].subject, "Networks");
        assert_eq!(summary.good_attendance_subjects.len(), 2);
    }

    #[test]
    fn test_overall_percentage_rounded() {
        let summary = summarize(vec![
            record("Networks", 3, 1),  // 33.333...
            record("Databases", 3, 2), // 66.666...
        ]);

        assert_eq!(summary.overall_percentage, 50.0);

        let summary = summarize(vec![record("Networks", 3, 1)]);
        assert_eq!(summary.overall_percentage, 33.33);
    }
}
