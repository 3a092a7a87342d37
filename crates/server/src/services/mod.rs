//! Services used by route handlers.

pub mod applicant;

pub use applicant::{ApplicantSession, ApplicantSessionError};
