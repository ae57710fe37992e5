// Application state (AppState)

use crate::core::config::Config;
use crate::metrics::collector::Metrics;
use crate::stores::attendance_store::AttendanceStore;
use crate::stores::result_store::ResultStore;
use crate::stores::student_store::StudentStore;
use crate::stores::user_store::UserStore;
use crate::wal::wal::Wal;
use std::sync::Arc;

/// Shared application state
///
/// Contains all shared components that are accessed by request handlers.
/// All fields are wrapped in Arc for efficient cloning across threads.
#[derive(Clone)]
pub struct AppState {
    /// Roster students
    pub student_store: Arc<StudentStore>,

    /// Registered accounts
    pub user_store: Arc<UserStore>,

    /// Attendance records keyed by (studentId, subject, semester)
    pub attendance_store: Arc<AttendanceStore>,

    /// Result records keyed by (studentId, subject, semester)
    pub result_store: Arc<ResultStore>,

    /// Metrics collector for tracking statistics
    pub metrics: Arc<Metrics>,

    /// Write-Ahead Log for persistence
    pub wal: Arc<Wal>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, wal: Wal) -> Self {
        Self {
            student_store: Arc::new(StudentStore::new()),
            user_store: Arc::new(UserStore::new()),
            attendance_store: Arc::new(AttendanceStore::new()),
            result_store: Arc::new(ResultStore::new()),
            metrics: Arc::new(Metrics::new()),
            wal: Arc::new(wal),
            config: Arc::new(config),
        }
    }
}
