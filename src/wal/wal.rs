use crate::models::attendance::AttendanceRecord;
use crate::models::result::ResultRecord;
use crate::models::student::Student;
use crate::models::user::User;
use anyhow::{bail, Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// WAL operation types
#[derive(Debug, Clone, PartialEq)]
pub enum WalOperation {
    PutStudent { student: Student },
    RemoveStudent { id: Uuid },
    PutUser { user: User },
    PutAttendance { record: AttendanceRecord },
    RemoveAttendance { id: Uuid },
    PutResult { record: ResultRecord },
    RemoveResult { id: Uuid },
}

impl WalOperation {
    fn to_line(&self) -> Result<String> {
        let line = match self {
            WalOperation::PutStudent { student } => {
                format!("PUT_STUDENT|{}", serde_json::to_string(student)?)
            }
            WalOperation::RemoveStudent { id } => format!("REMOVE_STUDENT|{}", id),
            WalOperation::PutUser { user } => {
                format!("PUT_USER|{}", serde_json::to_string(user)?)
            }
            WalOperation::PutAttendance { record } => {
                format!("PUT_ATTENDANCE|{}", serde_json::to_string(record)?)
            }
            WalOperation::RemoveAttendance { id } => format!("REMOVE_ATTENDANCE|{}", id),
            WalOperation::PutResult { record } => {
                format!("PUT_RESULT|{}", serde_json::to_string(record)?)
            }
            WalOperation::RemoveResult { id } => format!("REMOVE_RESULT|{}", id),
        };
        Ok(line)
    }

    fn from_line(line: &str) -> Result<Self> {
        let (op, payload) = line
            .split_once('|')
            .context("Missing operation separator")?;

        match op {
            "PUT_STUDENT" => Ok(WalOperation::PutStudent {
                student: serde_json::from_str(payload).context("Invalid student payload")?,
            }),
            "REMOVE_STUDENT" => Ok(WalOperation::RemoveStudent {
                id: payload.parse().context("Invalid student id")?,
            }),
            "PUT_USER" => Ok(WalOperation::PutUser {
                user: serde_json::from_str(payload).context("Invalid user payload")?,
            }),
            "PUT_ATTENDANCE" => Ok(WalOperation::PutAttendance {
                record: serde_json::from_str(payload).context("Invalid attendance payload")?,
            }),
            "REMOVE_ATTENDANCE" => Ok(WalOperation::RemoveAttendance {
                id: payload.parse().context("Invalid attendance id")?,
            }),
            "PUT_RESULT" => Ok(WalOperation::PutResult {
                record: serde_json::from_str(payload).context("Invalid result payload")?,
            }),
            "REMOVE_RESULT" => Ok(WalOperation::RemoveResult {
                id: payload.parse().context("Invalid result id")?,
            }),
            _ => bail!("Unknown operation type"),
        }
    }
}

pub struct Wal {
    file: Arc<Mutex<File>>,
    path: PathBuf,
}

impl Wal {
    pub fn new(path: PathBuf) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .context("Failed to open WAL file")?;

        Ok(Wal {
            file: Arc::new(Mutex::new(file)),
            path,
        })
    }

    pub fn log_operation(&self, op: WalOperation) -> Result<()> {
        let line = op.to_line()?;
        let mut file = self.file.lock().unwrap();
        writeln!(file, "{}", line).context("Failed to write to WAL")?;
        file.flush().context("Failed to flush WAL")?;
        Ok(())
    }

    pub fn replay(&self) -> Result<Vec<WalOperation>> {
        let file = File::open(&self.path).context("Failed to open WAL for replay")?;
        let reader = BufReader::new(file);
        let mut operations = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result.context("Failed to read line from WAL")?;
            let line = line.trim();

            // Skip empty lines
            if line.is_empty() {
                continue;
            }

            match WalOperation::from_line(line) {
                Ok(op) => operations.push(op),
                Err(e) => {
                    tracing::warn!(
                        line_num = line_num + 1,
                        error = %e,
                        "Failed to parse WAL line, skipping"
                    );
                }
            }
        }

        Ok(operations)
    }

    pub fn truncate(&self) -> Result<()> {
        let mut file = self.file.lock().unwrap();
        file.set_len(0).context("Failed to truncate WAL")?;
        file.flush().context("Failed to flush WAL after truncate")?;
        Ok(())
    }
}
