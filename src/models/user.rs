use crate::models::subject::Course;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

/// Auth-bearing account. The password is stored exactly as received;
/// credential comparison happens through a constant-time helper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub student_id: String,
    pub course: Course,
    pub year: u32,
    pub semester: u32,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Role,
    pub created_at: i64,
}

/// A user as returned by the API: every field except the password.
/// The configured admin login has no stored record, so the student-specific
/// fields are optional and omitted for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<Course>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub role: Role,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            student_id: Some(user.student_id.clone()),
            course: Some(user.course),
            year: Some(user.year),
            semester: Some(user.semester),
            phone: user.phone.clone(),
            address: user.address.clone(),
            role: user.role,
        }
    }
}

impl UserResponse {
    /// The configured admin identity, which exists only in config
    pub fn admin(email: String) -> Self {
        Self {
            id: "admin".to_string(),
            name: "Admin".to_string(),
            email,
            student_id: None,
            course: None,
            year: None,
            semester: None,
            phone: None,
            address: None,
            role: Role::Admin,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub course: Option<String>,
    pub year: Option<u32>,
    pub semester: Option<u32>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// PUT /api/auth/profile/{id} may touch only these fields
#[derive(Debug, Default, Deserialize)]
pub struct ProfilePayload {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}
