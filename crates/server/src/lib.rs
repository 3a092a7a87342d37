//! Applicant Intake server library.
//!
//! The applicant form service as a library, so the binary, the CLI and the
//! integration tests share one router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;

pub use app::{ServerError, build, run};
pub use config::IntakeConfig;
pub use state::AppState;
