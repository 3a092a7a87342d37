//! Session storage schema for applicant data.
//!
//! A record crosses into the session through [`StoredApplicant::encode`] and
//! comes back out through [`StoredApplicant::decode`]. Every leaf of the
//! schema is plain text (dates as `YYYY-MM-DD`, timestamps as RFC 3339), so
//! whatever serializer the session store uses sees only strings, and
//! `decode(encode(x)) == x` holds no matter how many times it runs.
//!
//! # Example
//!
//! ```text
//! {
//!   "version": 1,
//!   "updated_at": "2026-10-19T12:00:00Z",
//!   "applicant": {
//!     "first_name": "Jane",
//!     "last_name": "Doe",
//!     "gender": "f",
//!     "birthday": "1990-05-14",
//!     "email": "jane@example.com"
//!   }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ApplicantRecord;

/// Current version of the stored schema.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors decoding session-held applicant data.
///
/// These never describe user input: the value was written by this service,
/// so any failure here means the stored data and the code disagree.
#[derive(Debug, thiserror::Error)]
pub enum SessionDataError {
    /// The stored value carries no usable schema version.
    #[error("stored applicant has no schema version")]
    MissingVersion,

    /// The stored value was written under a different schema.
    #[error("stored applicant schema version {found} does not match expected {expected}")]
    SchemaMismatch {
        /// Version found in the stored value.
        found: u64,
        /// Version this build reads.
        expected: u32,
    },

    /// The stored value has the right version but does not fit the schema.
    #[error("stored applicant is malformed: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The record could not be encoded.
    #[error("applicant could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Versioned, text-only representation of an applicant held in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredApplicant {
    pub version: u32,
    pub updated_at: DateTime<Utc>,
    pub applicant: ApplicantRecord,
}

impl StoredApplicant {
    /// Wrap a record for storage under the current schema version.
    #[must_use]
    pub const fn new(applicant: ApplicantRecord, updated_at: DateTime<Utc>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            updated_at,
            applicant,
        }
    }

    /// Encode into the value written to the session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDataError::Encode`] if serialization fails.
    pub fn encode(&self) -> Result<Value, SessionDataError> {
        serde_json::to_value(self).map_err(SessionDataError::Encode)
    }

    /// Decode a value previously produced by [`encode`](Self::encode).
    ///
    /// # Errors
    ///
    /// - [`SessionDataError::MissingVersion`] if `version` is absent or not
    ///   an unsigned integer
    /// - [`SessionDataError::SchemaMismatch`] for any other version
    /// - [`SessionDataError::Malformed`] if a field does not parse as its
    ///   type, including a date held in anything but its text form
    pub fn decode(value: Value) -> Result<Self, SessionDataError> {
        let found = value
            .get("version")
            .and_then(Value::as_u64)
            .ok_or(SessionDataError::MissingVersion)?;

        if found != u64::from(SCHEMA_VERSION) {
            return Err(SessionDataError::SchemaMismatch {
                found,
                expected: SCHEMA_VERSION,
            });
        }

        serde_json::from_value(value).map_err(SessionDataError::Malformed)
    }

    /// Unwrap the stored record.
    #[must_use]
    pub fn into_record(self) -> ApplicantRecord {
        self.applicant
    }
}
