use crate::models::result::{PassStatus, ResultRecord};
use crate::summary::round_to_2;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// At or above this total percentage a subject counts as top performing
pub const TOP_PERFORMANCE_THRESHOLD: f64 = 80.0;
/// Below this total percentage a subject needs improvement
pub const NEEDS_IMPROVEMENT_THRESHOLD: f64 = 60.0;

/// How many subjects each highlight list carries
const HIGHLIGHT_LIMIT: usize = 3;

/// Per-student dashboard summary over all result records
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub total_subjects: usize,
    pub overall_percentage: f64,
    pub passed_subjects: usize,
    pub failed_subjects: usize,
    pub top_performing_subjects: Vec<ResultRecord>,
    pub need_improvement_subjects: Vec<ResultRecord>,
}

impl ResultSummary {
    /// A student with no records gets a defined zero shape, not an error
    pub fn empty() -> Self {
        Self {
            total_subjects: 0,
            overall_percentage: 0.0,
            passed_subjects: 0,
            failed_subjects: 0,
            top_performing_subjects: Vec::new(),
            need_improvement_subjects: Vec::new(),
        }
    }
}

fn by_percentage(a: &ResultRecord, b: &ResultRecord) -> Ordering {
    a.total
        .percentage
        .partial_cmp(&b.total.percentage)
        .unwrap_or(Ordering::Equal)
}

pub fn summarize(records: Vec<ResultRecord>) -> ResultSummary {
    if records.is_empty() {
        return ResultSummary::empty();
    }

    let total_subjects = records.len();
    let overall = records.iter().map(|r| r.total.percentage).sum::<f64>() / total_subjects as f64;
    let passed_subjects = records
        .iter()
        .filter(|r| r.status == PassStatus::Pass)
        .count();
    let failed_subjects = records
        .iter()
        .filter(|r| r.status == PassStatus::Fail)
        .count();

    let mut top: Vec<_> = records
        .iter()
        .filter(|r| r.total.percentage >= TOP_PERFORMANCE_THRESHOLD)
        .cloned()
        .collect();
    top.sort_by(|a, b| by_percentage(b, a));
    top.truncate(HIGHLIGHT_LIMIT);

    let mut needs: Vec<_> = records
        .iter()
        .filter(|r| r.total.percentage < NEEDS_IMPROVEMENT_THRESHOLD)
        .cloned()
        .collect();
    needs.sort_by(by_percentage);
    needs.truncate(HIGHLIGHT_LIMIT);

    ResultSummary {
        total_subjects,
        overall_percentage: round_to_2(overall),
        passed_subjects,
        failed_subjects,
        top_performing_subjects: top,
        need_improvement_subjects: needs,
    }
}
