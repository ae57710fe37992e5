use crate::stores::attendance_store::AttendanceStore;
use crate::stores::result_store::ResultStore;
use crate::stores::student_store::StudentStore;
use crate::stores::user_store::UserStore;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

pub struct Metrics {
    pub records_created: AtomicU64,
    pub records_updated: AtomicU64,
    pub records_deleted: AtomicU64,
    pub logins: AtomicU64,
    pub auth_failures: AtomicU64,
    pub start_time: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub records_created: u64,
    pub records_updated: u64,
    pub records_deleted: u64,
    pub logins: u64,
    pub auth_failures: u64,
    pub students: usize,
    pub users: usize,
    pub attendance_records: usize,
    pub result_records: usize,
    pub uptime_seconds: i64,
    pub writes_per_second: f64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            records_created: AtomicU64::new(0),
            records_updated: AtomicU64::new(0),
            records_deleted: AtomicU64::new(0),
            logins: AtomicU64::new(0),
            auth_failures: AtomicU64::new(0),
            start_time: crate::utils::time::current_timestamp(),
        }
    }

    pub fn increment_created(&self) {
        self.records_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_updated(&self) {
        self.records_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_deleted(&self) {
        self.records_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_logins(&self) {
        self.logins.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_auth_failures(&self) {
        self.auth_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Collects counters and store sizes into one snapshot with derived
    /// uptime and write rate.
    pub fn get_snapshot(
        &self,
        student_store: &StudentStore,
        user_store: &UserStore,
        attendance_store: &AttendanceStore,
        result_store: &ResultStore,
    ) -> MetricsSnapshot {
        let current_time = crate::utils::time::current_timestamp();

        let records_created = self.records_created.load(Ordering::Relaxed);
        let records_updated = self.records_updated.load(Ordering::Relaxed);
        let records_deleted = self.records_deleted.load(Ordering::Relaxed);

        let uptime_seconds = current_time - self.start_time;

        let total_writes = records_created + records_updated + records_deleted;
        let writes_per_second = if uptime_seconds > 0 {
            total_writes as f64 / uptime_seconds as f64
        } else {
            0.0
        };

        MetricsSnapshot {
            records_created,
            records_updated,
            records_deleted,
            logins: self.logins.load(Ordering::Relaxed),
            auth_failures: self.auth_failures.load(Ordering::Relaxed),
            students: student_store.len(),
            users: user_store.len(),
            attendance_records: attendance_store.len(),
            result_records: result_store.len(),
            uptime_seconds,
            writes_per_second,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::student::Student;
    use crate::models::subject::Course;

    #[test]
    fn test_new_metrics() {
        let metrics = Metrics::new();

        assert_eq!(metrics.records_created.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.logins.load(Ordering::Relaxed), 0);
        assert!(metrics.start_time > 0);
    }

    #[test]
    fn test_counters_increment() {
        let metrics = Metrics::new();

        metrics.increment_created();
        metrics.increment_created();
        metrics.increment_updated();
        metrics.increment_deleted();
        metrics.increment_logins();
        metrics.increment_auth_failures();

        assert_eq!(metrics.records_created.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.records_updated.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.records_deleted.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.logins.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.auth_failures.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_snapshot_reflects_store_sizes() {
        let metrics = Metrics::new();
        let students = StudentStore::new();
        let users = UserStore::new();
        let attendance = AttendanceStore::new();
        let results = ResultStore::new();

        students.insert(Student::new(
            "Asha Rao".to_string(),
            "asha@example.edu".to_string(),
            Course::Cse,
            3,
            1000,
        ));
        metrics.increment_created();

        let snapshot = metrics.get_snapshot(&students, &users, &attendance, &results);

        assert_eq!(snapshot.records_created, 1);
        assert_eq!(snapshot.students, 1);
        assert_eq!(snapshot.users, 0);
        assert_eq!(snapshot.attendance_records, 0);
        assert_eq!(snapshot.result_records, 0);
        assert!(snapshot.uptime_seconds >= 0);
        assert!(snapshot.writes_per_second >= 0.0);
    }
}
