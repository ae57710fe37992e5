use crate::core::config::AuthConfig;
use crate::core::error::ApiError;
use crate::models::user::Role;
use axum::http::{header, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id, or "admin" for the configured admin login
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Sign a bearer token for the given identity
pub fn issue_token(
    user_id: &str,
    role: Role,
    config: &AuthConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expires_at = now + Duration::seconds(config.token_ttl_seconds);

    let claims = Claims {
        sub: user_id.to_string(),
        role,
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
}

/// Verify a token's signature and expiry, returning its claims
pub fn verify_token(
    token: &str,
    config: &AuthConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// Pull the bearer token out of the Authorization header and verify it.
/// Missing header maps to 401, a bad or expired token to 403.
pub fn authenticate(headers: &HeaderMap, config: &AuthConfig) -> Result<Claims, ApiError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::MissingToken)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::MissingToken)?;

    verify_token(token, config).map_err(|_| ApiError::InvalidToken)
}
