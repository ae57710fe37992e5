use anyhow::{Context, Result};

use crate::core::state::AppState;
use crate::wal::wal::WalOperation;

// this runs at boot time
pub fn apply_wal_operations(state: &AppState, operations: &[WalOperation]) -> Result<()> {
    for op in operations {
        match op {
            WalOperation::PutStudent { student } => {
                state.student_store.insert(student.clone());
            }
            WalOperation::RemoveStudent { id } => {
                state.student_store.remove(*id);
            }
            WalOperation::PutUser { user } => {
                state.user_store.insert(user.clone());
            }
            WalOperation::PutAttendance { record } => {
                state.attendance_store.insert(record.clone());
            }
            WalOperation::RemoveAttendance { id } => {
                state.attendance_store.remove_by_id(*id);
            }
            WalOperation::PutResult { record } => {
                state.result_store.insert(record.clone());
            }
            WalOperation::RemoveResult { id } => {
                state.result_store.remove_by_id(*id);
            }
        }
    }
    Ok(())
}

/// Rewrite the log as one put per live record. Replayed removes and
/// overwritten puts would otherwise grow the file on every restart.
/// Runs after `apply_wal_operations`, so the stores already hold the
/// surviving state.
pub fn compact_wal(state: &AppState) -> Result<()> {
    state.wal.truncate().context("Failed to truncate WAL")?;

    for student in state.student_store.list() {
        state.wal.log_operation(WalOperation::PutStudent { student })?;
    }
    for user in state.user_store.list() {
        state.wal.log_operation(WalOperation::PutUser { user })?;
    }
    for record in state.attendance_store.list() {
        state.wal.log_operation(WalOperation::PutAttendance { record })?;
    }
    for record in state.result_store.list() {
        state.wal.log_operation(WalOperation::PutResult { record })?;
    }

    Ok(())
}
