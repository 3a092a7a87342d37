//! Applicant Intake Core - Domain types for the applicant form.
//!
//! This crate provides the types shared by the server and the CLI:
//! - `server` - Form handler backed by `PostgreSQL` sessions
//! - `cli` - Migrations and session maintenance
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP. Untrusted text enters through
//! [`applicant::ApplicantForm::validate`]; session-held data enters through
//! [`applicant::StoredApplicant::decode`]. The two paths never cross.
//!
//! # Modules
//!
//! - [`types`] - Validated newtypes for names, emails, genders and birth dates
//! - [`applicant`] - The applicant record, its form, and its stored schema

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod applicant;
pub mod types;

pub use applicant::{
    ApplicantForm, ApplicantRecord, FieldError, PublicApplicant, SCHEMA_VERSION,
    SessionDataError, StoredApplicant, ValidationErrors,
};
pub use types::*;
