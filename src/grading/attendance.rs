use crate::models::attendance::AttendanceRecord;

/// Below this percentage a subject counts as low attendance
pub const LOW_ATTENDANCE_THRESHOLD: f64 = 75.0;

/// Percentage of classes attended; zero scheduled classes yields 0
pub fn attendance_percentage(total_classes: u32, attended_classes: u32) -> f64 {
    if total_classes > 0 {
        attended_classes as f64 / total_classes as f64 * 100.0
    } else {
        0.0
    }
}

/// Refresh the derived fields from the raw counts.
/// Runs immediately before every persistence; caller input is never trusted
/// for the percentage.
pub fn recompute(record: &mut AttendanceRecord, now: i64) {
    record.attendance_percentage =
        attendance_percentage(record.total_classes, record.attended_classes);
    record.last_updated = now;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::subject::Course;

    #[test]
    fn test_percentage_basic() {
        assert_eq!(attendance_percentage(20, 14), 70.0);
        assert_eq!(attendance_percentage(4, 1), 25.0);
        assert_eq!(attendance_percentage(10, 10), 100.0);
    }

    #[test]
    fn test_percentage_zero_classes() {
        assert_eq!(attendance_percentage(0, 0), 0.0);
        // attended > 0 with no scheduled classes still yields 0
        assert_eq!(attendance_percentage(0, 5), 0.0);
    }

    #[test]
    fn test_low_attendance_boundary() {
        // 70% < 75 classifies as low, 75% does not
        assert!(attendance_percentage(20, 14) < LOW_ATTENDANCE_THRESHOLD);
        assert!(attendance_percentage(20, 15) >= LOW_ATTENDANCE_THRESHOLD);
    }

    #[test]
    fn test_recompute_overwrites_supplied_percentage() {
        let mut record = AttendanceRecord::new(
            "CSE253101".to_string(),
            "Asha Rao".to_string(),
            Course::Cse,
            3,
            5,
            "Networks".to_string(),
            "CS301".to_string(),
            20,
            14,
            1000,
        );
        record.attendance_percentage = 99.0;

        recompute(&mut record, 2000);

        assert_eq!(record.attendance_percentage, 70.0);
        assert_eq!(record.last_updated, 2000);
    }
}
