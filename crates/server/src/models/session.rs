//! Session keys.
//!
//! Every value the service keeps in the session lives under one of these
//! keys. Values are written and read through their owning service only.

/// Session keys for applicant data.
pub mod keys {
    /// Key for the versioned applicant record
    /// (`applicant_intake_core::StoredApplicant`).
    pub const APPLICANT: &str = "applicant";
}
