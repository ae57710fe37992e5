pub mod attendance;
pub mod auth;
pub mod fallback;
pub mod health;
pub mod metrics;
pub mod results;
pub mod students;

use crate::core::error::ApiError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Plain acknowledgement body used by delete endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Route-parameter record ids are UUID strings
pub(crate) fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    id.parse()
        .map_err(|_| ApiError::Validation(format!("Invalid record id: {}", id)))
}
