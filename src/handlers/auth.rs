use crate::auth::credentials::secure_compare;
use crate::auth::student_id::generate_student_id;
use crate::auth::token::issue_token;
use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::handlers::parse_id;
use crate::models::user::{
    LoginPayload, ProfilePayload, RegisterPayload, Role, User, UserResponse,
};
use crate::utils::time::current_timestamp;
use crate::validation::fields::{parse_course, required, required_str};
use crate::wal::wal::WalOperation;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Register a student account and assign a generated student id
///
/// POST /api/auth/register
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterPayload>,
) -> Result<Response, ApiError> {
    let name = required_str(payload.name, "name")?;
    let email = required_str(payload.email, "email")?;
    let password = required(payload.password, "password")?;
    let course = parse_course(&required_str(payload.course, "course")?)?;
    let year = required(payload.year, "year")?;
    let semester = required(payload.semester, "semester")?;

    if state.user_store.email_exists(&email) {
        warn!(email = %email, "Registration attempt with taken email");
        return Err(ApiError::Duplicate(
            "User already exists with this email".to_string(),
        ));
    }

    let student_id = generate_student_id(course, year, |candidate| {
        state.user_store.student_id_exists(candidate)
    })?;

    let user = User {
        id: Uuid::new_v4(),
        name,
        email,
        password,
        student_id,
        course,
        year,
        semester,
        phone: payload.phone,
        address: payload.address,
        role: Role::Student,
        created_at: current_timestamp(),
    };

    state.user_store.insert(user.clone());

    if let Err(e) = state
        .wal
        .log_operation(WalOperation::PutUser { user: user.clone() })
    {
        warn!(error = %e, "Failed to log registration to WAL");
        // Continue anyway - store is updated
    }

    state.metrics.increment_created();

    info!(
        id = %user.id,
        student_id = %user.student_id,
        course = %user.course,
        "User registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful".to_string(),
            user: UserResponse::from(&user),
        }),
    )
        .into_response())
}

/// Validate credentials and issue a bearer token
///
/// POST /api/auth/login
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginPayload>,
) -> Result<Response, ApiError> {
    let email = required_str(payload.email, "email")?;
    let password = required(payload.password, "password")?;

    // Config-injected admin credentials short-circuit the user lookup
    if let (Some(admin_email), Some(admin_password)) = (
        &state.config.auth.admin_email,
        &state.config.auth.admin_password,
    ) {
        if secure_compare(&email, admin_email) && secure_compare(&password, admin_password) {
            let token =
                issue_token("admin", Role::Admin, &state.config.auth).map_err(anyhow::Error::new)?;

            state.metrics.increment_logins();
            info!(email = %email, "Admin login");

            return Ok(Json(LoginResponse {
                message: "Login successful".to_string(),
                token,
                user: UserResponse::admin(email),
            })
            .into_response());
        }
    }

    let user = match state.user_store.find_by_email(&email) {
        Some(user) => user,
        None => {
            state.metrics.increment_auth_failures();
            warn!(email = %email, "Login attempt for unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !secure_compare(&password, &user.password) {
        state.metrics.increment_auth_failures();
        warn!(email = %email, "Login attempt with wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = issue_token(&user.id.to_string(), user.role, &state.config.auth)
        .map_err(anyhow::Error::new)?;

    state.metrics.increment_logins();
    info!(id = %user.id, student_id = %user.student_id, "User login");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: UserResponse::from(&user),
    })
    .into_response())
}

/// Fetch a user profile, minus the password
///
/// GET /api/auth/profile/{id}
pub async fn profile_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;

    let user = state
        .user_store
        .get(id)
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::from(&user)).into_response())
}

/// Update a profile; only name, phone and address may change
///
/// PUT /api/auth/profile/{id}
pub async fn profile_update_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<ProfilePayload>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;

    let updated = state
        .user_store
        .update(id, |user| {
            if let Some(name) = payload.name {
                user.name = name;
            }
            if let Some(phone) = payload.phone {
                user.phone = Some(phone);
            }
            if let Some(address) = payload.address {
                user.address = Some(address);
            }
        })
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if let Err(e) = state.wal.log_operation(WalOperation::PutUser {
        user: updated.clone(),
    }) {
        warn!(error = %e, "Failed to log profile update to WAL");
    }

    state.metrics.increment_updated();

    info!(id = %updated.id, "Profile updated");

    Ok(Json(ProfileResponse {
        message: "Profile updated successfully".to_string(),
        user: UserResponse::from(&updated),
    })
    .into_response())
}

/// List all student accounts, minus passwords
///
/// GET /api/auth/students
pub async fn students_handler(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let students: Vec<UserResponse> = state
        .user_store
        .list_students()
        .iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(students).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::verify_token;
    use crate::core::config::{AuthConfig, Config, LoggingConfig, ServerConfig, StorageConfig};
    use crate::wal::wal::Wal;
    use axum::body::Body;
    use http_body_util::BodyExt;
    use tempfile::TempDir;

    fn create_test_config() -> Config {
        Config {
            server: ServerConfig {
                port: 5000,
                num_threads: 2,
            },
            storage: StorageConfig::default(),
            auth: AuthConfig {
                jwt_secret: "test-secret-key".to_string(),
                token_ttl_seconds: 3600,
                admin_email: Some("admin@example.edu".to_string()),
                admin_password: Some("admin123".to_string()),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "console".to_string(),
                console: true,
            },
        }
    }

    fn create_test_state() -> Arc<AppState> {
        let temp_dir = TempDir::new().unwrap();
        let wal = Wal::new(temp_dir.path().join("test.wal")).unwrap();
        Arc::new(AppState::new(create_test_config(), wal))
    }

    fn register_payload(email: &str) -> RegisterPayload {
        RegisterPayload {
            name: Some("Asha Rao".to_string()),
            email: Some(email.to_string()),
            password: Some("secret123".to_string()),
            course: Some("CSE".to_string()),
            year: Some(3),
            semester: Some(5),
            phone: Some("555-0101".to_string()),
            address: None,
        }
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let (_, body) = response.into_parts();
        let bytes = Body::new(body).collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_register_success() {
        let state = create_test_state();

        let response = register_handler(
            State(state.clone()),
            Json(register_payload("asha@example.edu")),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(state.user_store.len(), 1);

        let body: RegisterResponse = read_json(response).await;
        assert_eq!(body.message, "Registration successful");
        let student_id = body.user.student_id.unwrap();
        assert!(student_id.starts_with("CSE"));
        assert_eq!(body.user.role, Role::Student);
    }

    #[tokio::test]
    async fn test_register_response_has_no_password() {
        let state = create_test_state();

        let response = register_handler(
            State(state),
            Json(register_payload("asha@example.edu")),
        )
        .await
        .unwrap();

        let (_, body) = response.into_parts();
        let bytes = Body::new(body).collect().await.unwrap().to_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();

        assert!(!text.contains("password"));
        assert!(!text.contains("secret123"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let state = create_test_state();

        register_handler(
            State(state.clone()),
            Json(register_payload("asha@example.edu")),
        )
        .await
        .unwrap();

        let result = register_handler(
            State(state.clone()),
            Json(register_payload("asha@example.edu")),
        )
        .await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.user_store.len(), 1);
    }

    #[tokio::test]
    async fn test_register_missing_password() {
        let state = create_test_state();

        let mut payload = register_payload("asha@example.edu");
        payload.password = None;

        let result = register_handler(State(state), Json(payload)).await;
        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_issues_valid_token() {
        let state = create_test_state();

        register_handler(
            State(state.clone()),
            Json(register_payload("asha@example.edu")),
        )
        .await
        .unwrap();

        let response = login_handler(
            State(state.clone()),
            Json(LoginPayload {
                email: Some("asha@example.edu".to_string()),
                password: Some("secret123".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: LoginResponse = read_json(response).await;

        let claims = verify_token(&body.token, &state.config.auth).unwrap();
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.sub, body.user.id);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let state = create_test_state();

        register_handler(
            State(state.clone()),
            Json(register_payload("asha@example.edu")),
        )
        .await
        .unwrap();

        let result = login_handler(
            State(state),
            Json(LoginPayload {
                email: Some("asha@example.edu".to_string()),
                password: Some("wrong".to_string()),
            }),
        )
        .await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let state = create_test_state();

        let result = login_handler(
            State(state),
            Json(LoginPayload {
                email: Some("nobody@example.edu".to_string()),
                password: Some("whatever".to_string()),
            }),
        )
        .await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_login_from_config() {
        let state = create_test_state();

        let response = login_handler(
            State(state.clone()),
            Json(LoginPayload {
                email: Some("admin@example.edu".to_string()),
                password: Some("admin123".to_string()),
            }),
        )
        .await
        .unwrap();

        let body: LoginResponse = read_json(response).await;
        assert_eq!(body.user.id, "admin");
        assert_eq!(body.user.role, Role::Admin);

        let claims = verify_token(&body.token, &state.config.auth).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_admin_login_absent_when_not_configured() {
        let temp_dir = TempDir::new().unwrap();
        let wal = Wal::new(temp_dir.path().join("test.wal")).unwrap();
        let mut config = create_test_config();
        config.auth.admin_email = None;
        config.auth.admin_password = None;
        let state = Arc::new(AppState::new(config, wal));

        let result = login_handler(
            State(state),
            Json(LoginPayload {
                email: Some("admin@example.edu".to_string()),
                password: Some("admin123".to_string()),
            }),
        )
        .await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_profile_round_trip() {
        let state = create_test_state();

        register_handler(
            State(state.clone()),
            Json(register_payload("asha@example.edu")),
        )
        .await
        .unwrap();
        let id = state.user_store.list_students().remove(0).id;

        let response = profile_handler(State(state.clone()), Path(id.to_string()))
            .await
            .unwrap();
        let profile: UserResponse = read_json(response).await;
        assert_eq!(profile.email, "asha@example.edu");

        let response = profile_update_handler(
            State(state.clone()),
            Path(id.to_string()),
            Json(ProfilePayload {
                name: None,
                phone: Some("555-0199".to_string()),
                address: Some("12 College Road".to_string()),
            }),
        )
        .await
        .unwrap();
        let body: ProfileResponse = read_json(response).await;
        assert_eq!(body.user.phone.as_deref(), Some("555-0199"));

        // email and student id are untouched by profile updates
        let stored = state.user_store.get(id).unwrap();
        assert_eq!(stored.email, "asha@example.edu");
        assert_eq!(stored.name, "Asha Rao");
        assert_eq!(stored.address.as_deref(), Some("12 College Road"));
    }

    #[tokio::test]
    async fn test_profile_missing_user() {
        let state = create_test_state();

        let result = profile_handler(State(state), Path(Uuid::new_v4().to_string())).await;
        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_students_listing_excludes_password() {
        let state = create_test_state();

        register_handler(
            State(state.clone()),
            Json(register_payload("asha@example.edu")),
        )
        .await
        .unwrap();

        let response = students_handler(State(state)).await.unwrap();
        let (_, body) = response.into_parts();
        let bytes = Body::new(body).collect().await.unwrap().to_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();

        assert!(text.contains("asha@example.edu"));
        assert!(!text.contains("secret123"));
    }

    #[tokio::test]
    async fn test_generated_student_ids_unique() {
        let state = create_test_state();

        for n in 0..20 {
            register_handler(
                State(state.clone()),
                Json(register_payload(&format!("student{}@example.edu", n))),
            )
            .await
            .unwrap();
        }

        let students = state.user_store.list_students();
        let mut ids: Vec<_> = students.iter().map(|u| u.student_id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }
}
