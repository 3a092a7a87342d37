//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Applicant
//! GET  /applicant              - Form, pre-filled from the session
//! POST /applicant              - Validate and store in the session
//! POST /applicant/clear        - Remove the stored applicant
//!
//! # API
//! GET  /api/applicant          - Stored applicant as JSON
//! ```

pub mod api;
pub mod applicant;
pub mod health;

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the applicant routes router.
pub fn applicant_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(applicant::show).post(applicant::submit))
        .route("/clear", post(applicant::clear))
}

/// Create the API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/applicant", get(api::applicant))
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/applicant", applicant_routes())
        .nest("/api", api_routes())
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_owned())
}
