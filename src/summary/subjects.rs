use crate::models::result::{PassStatus, ResultRecord};
use crate::models::subject::Course;
use crate::summary::round_to_2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Admin-wide statistics for one (subject, course, year) group
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectStatistics {
    pub subject: String,
    pub course: Course,
    pub year: u32,
    pub average_percentage: f64,
    pub total_students: usize,
    pub passed_students: usize,
    pub failed_students: usize,
    pub pass_percentage: f64,
    pub highest_marks: f64,
    pub lowest_marks: f64,
}

/// Group all result records by (subject, course, year) and compute aggregate
/// statistics per group, sorted by (course, year, subject).
pub fn subject_statistics(records: &[ResultRecord]) -> Vec<SubjectStatistics> {
    let mut groups: HashMap<(String, Course, u32), Vec<&ResultRecord>> = HashMap::new();
    for record in records {
        groups
            .entry((record.subject.clone(), record.course, record.year))
            .or_default()
            .push(record);
    }

    let mut stats: Vec<SubjectStatistics> = groups
        .into_iter()
        .map(|((subject, course, year), members)| {
            let total_students = members.len();
            let passed_students = members
                .iter()
                .filter(|r| r.status == PassStatus::Pass)
                .count();
            let failed_students = total_students - passed_students;

            let sum: f64 = members.iter().map(|r| r.total.percentage).sum();
            let highest = members
                .iter()
                .map(|r| r.total.percentage)
                .fold(f64::MIN, f64::max);
            let lowest = members
                .iter()
                .map(|r| r.total.percentage)
                .fold(f64::MAX, f64::min);

            SubjectStatistics {
                subject,
                course,
                year,
                average_percentage: round_to_2(sum / total_students as f64),
                total_students,
                passed_students,
                failed_students,
                pass_percentage: round_to_2(passed_students as f64 / total_students as f64 * 100.0),
                highest_marks: round_to_2(highest),
                lowest_marks: round_to_2(lowest),
            }
        })
        .collect();

    stats.sort_by(|a, b| {
        (a.course.as_str(), a.year, a.subject.as_str())
            .cmp(&(b.course.as_str(), b.year, b.subject.as_str()))
    });

    stats
}
