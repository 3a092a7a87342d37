//! Applicant Intake - applicant form backed by server-side sessions.
//!
//! # Architecture
//!
//! - Axum web framework, Askama templates for server-side rendering
//! - tower-sessions with a `PostgreSQL` store; the cookie carries only the
//!   session id
//! - The applicant record is kept in the session in one versioned text
//!   schema (`applicant_intake_core::StoredApplicant`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use applicant_intake_server::{IntakeConfig, run, telemetry};

#[tokio::main]
async fn main() -> ExitCode {
    // Configuration is needed before Sentry, and Sentry before tracing.
    let config = match IntakeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            telemetry::init_tracing();
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let _sentry_guard = telemetry::init_sentry(&config.sentry);
    telemetry::init_tracing();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server error");
            ExitCode::FAILURE
        }
    }
}
