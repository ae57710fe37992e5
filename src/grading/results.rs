use crate::models::result::{Grade, PassStatus, ResultRecord};

/// Minimum total percentage for a Pass
pub const PASS_THRESHOLD: f64 = 40.0;

/// Grade thresholds evaluated highest-first, first match wins
pub fn grade_for(percentage: f64) -> Grade {
    if percentage >= 90.0 {
        Grade::APlus
    } else if percentage >= 80.0 {
        Grade::A
    } else if percentage >= 70.0 {
        Grade::BPlus
    } else if percentage >= 60.0 {
        Grade::B
    } else if percentage >= 50.0 {
        Grade::C
    } else if percentage >= PASS_THRESHOLD {
        Grade::D
    } else {
        Grade::F
    }
}

pub fn status_for(percentage: f64) -> PassStatus {
    if percentage >= PASS_THRESHOLD {
        PassStatus::Pass
    } else {
        PassStatus::Fail
    }
}

/// Recompute every derived field from the raw midterm marks.
/// Runs after each merge of caller-supplied marks and before persistence;
/// grade, status and percentages are never accepted from the caller.
pub fn recompute(record: &mut ResultRecord) {
    if record.mid1.total_marks > 0.0 {
        record.mid1.percentage = record.mid1.marks_obtained / record.mid1.total_marks * 100.0;
    }
    if record.mid2.total_marks > 0.0 {
        record.mid2.percentage = record.mid2.marks_obtained / record.mid2.total_marks * 100.0;
    }

    record.total.marks_obtained = record.mid1.marks_obtained + record.mid2.marks_obtained;
    record.total.percentage = record.total.marks_obtained / record.total.total_marks * 100.0;

    record.grade = grade_for(record.total.percentage);
    record.status = status_for(record.total.percentage);
}
