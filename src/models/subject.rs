use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Courses the department offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Course {
    #[serde(rename = "CSE")]
    Cse,
    #[serde(rename = "IT")]
    It,
    #[serde(rename = "CE")]
    Ce,
}

impl Course {
    pub fn as_str(&self) -> &'static str {
        match self {
            Course::Cse => "CSE",
            Course::It => "IT",
            Course::Ce => "CE",
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Course {
    type Err = String;

    /// Course codes arrive from route parameters in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CSE" => Ok(Course::Cse),
            "IT" => Ok(Course::It),
            "CE" => Ok(Course::Ce),
            other => Err(format!("Unknown course: {}", other)),
        }
    }
}

/// One attendance or result record exists per (student, subject, semester)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectKey {
    pub student_id: String,
    pub subject: String,
    pub semester: u32,
}

impl SubjectKey {
    pub fn new(student_id: impl Into<String>, subject: impl Into<String>, semester: u32) -> Self {
        Self {
            student_id: student_id.into(),
            subject: subject.into(),
            semester,
        }
    }
}
