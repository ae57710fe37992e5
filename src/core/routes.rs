// HTTP routes configuration

use crate::core::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Public endpoints
        .route("/health", get(crate::handlers::health::health_handler))

        // Monitoring (admin token)
        .route("/metrics", get(crate::handlers::metrics::metrics_handler))

        // Students (bearer token required)
        .route(
            "/api/students",
            post(crate::handlers::students::create_handler)
                .get(crate::handlers::students::list_handler),
        )
        .route(
            "/api/students/{id}",
            put(crate::handlers::students::update_handler)
                .delete(crate::handlers::students::delete_handler),
        )

        // Auth
        .route("/api/auth/register", post(crate::handlers::auth::register_handler))
        .route("/api/auth/login", post(crate::handlers::auth::login_handler))
        .route(
            "/api/auth/profile/{id}",
            get(crate::handlers::auth::profile_handler)
                .put(crate::handlers::auth::profile_update_handler),
        )
        .route("/api/auth/students", get(crate::handlers::auth::students_handler))

        // Attendance
        .route(
            "/api/attendance",
            post(crate::handlers::attendance::upsert_handler)
                .get(crate::handlers::attendance::list_handler),
        )
        .route("/api/attendance/bulk", post(crate::handlers::attendance::bulk_handler))
        .route(
            "/api/attendance/student/{student_id}",
            get(crate::handlers::attendance::by_student_handler),
        )
        .route(
            "/api/attendance/course/{course}/year/{year}",
            get(crate::handlers::attendance::by_course_year_handler),
        )
        .route(
            "/api/attendance/summary/{student_id}",
            get(crate::handlers::attendance::summary_handler),
        )
        .route(
            "/api/attendance/{id}",
            put(crate::handlers::attendance::update_handler)
                .delete(crate::handlers::attendance::delete_handler),
        )

        // Results
        .route(
            "/api/results",
            post(crate::handlers::results::upsert_handler)
                .get(crate::handlers::results::list_handler),
        )
        .route("/api/results/bulk", post(crate::handlers::results::bulk_handler))
        .route(
            "/api/results/student/{student_id}",
            get(crate::handlers::results::by_student_handler),
        )
        .route(
            "/api/results/course/{course}/year/{year}",
            get(crate::handlers::results::by_course_year_handler),
        )
        .route(
            "/api/results/summary/{student_id}",
            get(crate::handlers::results::summary_handler),
        )
        .route(
            "/api/results/statistics/subjects",
            get(crate::handlers::results::statistics_handler),
        )
        .route(
            "/api/results/{id}",
            put(crate::handlers::results::update_handler)
                .delete(crate::handlers::results::delete_handler),
        )

        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state)
}
