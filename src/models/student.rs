use crate::models::subject::Course;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A student roster entry, separate from the auth-bearing [`crate::models::user::User`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub course: Course,
    pub year: u32,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Student {
    pub fn new(name: String, email: String, course: Course, year: u32, now: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            course,
            year,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of POST /api/students and PUT /api/students/{id}.
/// All fields optional so required-field checks produce 400s instead of
/// deserialization rejections; updates merge only what was supplied.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
    pub year: Option<u32>,
}
