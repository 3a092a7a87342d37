//! Applicant record storage in the session.
//!
//! [`ApplicantSession`] is the only code that reads or writes the
//! [`APPLICANT`](crate::models::session_keys::APPLICANT) key. Writes go
//! through [`StoredApplicant::encode`] and reads through
//! [`StoredApplicant::decode`]; form validation never runs on this path.

use applicant_intake_core::{ApplicantRecord, SessionDataError, StoredApplicant};
use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use thiserror::Error;
use tower_sessions::Session;

use crate::models::session_keys;

/// Errors reading or writing the applicant entry.
#[derive(Debug, Error)]
pub enum ApplicantSessionError {
    /// The session store failed.
    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// The stored entry could not be decoded.
    #[error(transparent)]
    Data(#[from] SessionDataError),
}

/// Extractor giving typed access to the applicant entry of the current
/// session.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(applicants: ApplicantSession) -> impl IntoResponse {
///     let record = applicants.load_or_discard().await?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApplicantSession {
    session: Session,
}

/// Rejection when the session layer is not installed.
pub struct MissingSessionLayer;

impl IntoResponse for MissingSessionLayer {
    fn into_response(self) -> Response {
        tracing::error!("ApplicantSession used without SessionManagerLayer");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

impl<S> FromRequestParts<S> for ApplicantSession
where
    S: Send + Sync,
{
    type Rejection = MissingSessionLayer;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(MissingSessionLayer)?;

        Ok(Self::new(session))
    }
}

impl ApplicantSession {
    /// Wrap a framework session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Read the stored applicant, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicantSessionError::Data`] if the stored entry does not
    /// decode, and [`ApplicantSessionError::Session`] if the store fails.
    pub async fn load(&self) -> Result<Option<ApplicantRecord>, ApplicantSessionError> {
        let Some(value) = self
            .session
            .get_value(session_keys::APPLICANT)
            .await?
        else {
            return Ok(None);
        };

        let stored = StoredApplicant::decode(value)?;
        Ok(Some(stored.into_record()))
    }

    /// Read the stored applicant, dropping an entry that does not decode.
    ///
    /// A bad entry is reported to the logs and Sentry and then removed, so
    /// later requests on the same session start from an empty record
    /// instead of failing on the same data.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicantSessionError::Session`] if the store fails.
    pub async fn load_or_discard(&self) -> Result<Option<ApplicantRecord>, ApplicantSessionError> {
        match self.load().await {
            Err(ApplicantSessionError::Data(e)) => {
                let event_id = sentry::capture_error(&e);
                tracing::error!(
                    error = %e,
                    sentry_event_id = %event_id,
                    session_id = ?self.session.id(),
                    "Discarding undecodable applicant session entry"
                );
                self.clear().await?;
                Ok(None)
            }
            other => other,
        }
    }

    /// Write `record` as the stored applicant, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the session store fails.
    pub async fn store(&self, record: &ApplicantRecord) -> Result<(), ApplicantSessionError> {
        let value = StoredApplicant::new(record.clone(), Utc::now()).encode()?;
        self.session.insert(session_keys::APPLICANT, value).await?;
        Ok(())
    }

    /// Merge `incoming` into the stored applicant and store the result.
    ///
    /// Returns the merged record.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn update(
        &self,
        incoming: ApplicantRecord,
    ) -> Result<ApplicantRecord, ApplicantSessionError> {
        let mut record = self.load_or_discard().await?.unwrap_or_default();
        record.merge(incoming);
        self.store(&record).await?;
        Ok(record)
    }

    /// Remove the stored applicant.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn clear(&self) -> Result<(), ApplicantSessionError> {
        self.session
            .remove_value(session_keys::APPLICANT)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use applicant_intake_core::ApplicantForm;
    use serde_json::json;
    use tower_sessions::MemoryStore;

    use super::*;

    fn applicants() -> ApplicantSession {
        let store = Arc::new(MemoryStore::default());
        ApplicantSession::new(Session::new(None, store, None))
    }

    fn jane() -> ApplicantRecord {
        ApplicantForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            gender: "f".to_string(),
            birthday: "1990-05-14".to_string(),
            email: "jane@example.com".to_string(),
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn test_load_empty_session() {
        assert_eq!(applicants().load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_then_load_repeatedly() {
        let applicants = applicants();
        applicants.store(&jane()).await.unwrap();

        for _ in 0..10 {
            assert_eq!(applicants.load().await.unwrap(), Some(jane()));
        }
    }

    #[tokio::test]
    async fn test_stored_value_is_versioned_text() {
        let applicants = applicants();
        applicants.store(&jane()).await.unwrap();

        let raw = applicants
            .session
            .get_value(session_keys::APPLICANT)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(raw["version"], json!(1));
        assert_eq!(raw["applicant"]["birthday"], json!("1990-05-14"));
    }

    #[tokio::test]
    async fn test_stored_value_survives_postgres_store_codec() {
        use std::collections::HashMap;

        use tower_sessions::{
            cookie::time::OffsetDateTime,
            session::{Id, Record},
        };

        let applicants = applicants();
        applicants.store(&jane()).await.unwrap();
        let raw = applicants
            .session
            .get_value(session_keys::APPLICANT)
            .await
            .unwrap()
            .unwrap();

        // PostgresStore writes the whole record as MessagePack.
        let mut record = Record {
            id: Id::default(),
            data: HashMap::from([(session_keys::APPLICANT.to_string(), raw)]),
            expiry_date: OffsetDateTime::now_utc(),
        };

        for _ in 0..10 {
            let bytes = rmp_serde::to_vec(&record).unwrap();
            record = rmp_serde::from_slice(&bytes).unwrap();

            let value = record.data.get(session_keys::APPLICANT).cloned().unwrap();
            let stored = StoredApplicant::decode(value).unwrap();
            assert_eq!(stored.into_record(), jane());
        }
    }

    #[tokio::test]
    async fn test_update_merges() {
        let applicants = applicants();
        applicants.store(&jane()).await.unwrap();

        let merged = applicants
            .update(ApplicantRecord {
                email: Some("jane.doe@example.org".parse().unwrap()),
                ..ApplicantRecord::default()
            })
            .await
            .unwrap();

        assert_eq!(merged.first_name, jane().first_name);
        assert_eq!(merged.email.unwrap().as_str(), "jane.doe@example.org");
    }

    #[tokio::test]
    async fn test_load_reports_bad_entry() {
        let applicants = applicants();
        applicants
            .session
            .insert(session_keys::APPLICANT, json!({ "birthday": "1990-05-14" }))
            .await
            .unwrap();

        let err = applicants.load().await.unwrap_err();
        assert!(matches!(
            err,
            ApplicantSessionError::Data(SessionDataError::MissingVersion)
        ));
    }

    #[tokio::test]
    async fn test_load_or_discard_removes_bad_entry() {
        let applicants = applicants();
        applicants
            .session
            .insert(
                session_keys::APPLICANT,
                json!({
                    "version": 1,
                    "updated_at": "2026-10-19T12:00:00Z",
                    "applicant": { "birthday": { "year": 1990, "month": 5, "day": 14 } }
                }),
            )
            .await
            .unwrap();

        assert_eq!(applicants.load_or_discard().await.unwrap(), None);
        // The entry is gone, so a plain load no longer fails.
        assert_eq!(applicants.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_replaces_bad_entry() {
        let applicants = applicants();
        applicants
            .session
            .insert(session_keys::APPLICANT, json!({ "version": 0 }))
            .await
            .unwrap();

        let merged = applicants.update(jane()).await.unwrap();
        assert_eq!(merged, jane());
        assert_eq!(applicants.load().await.unwrap(), Some(jane()));
    }

    #[tokio::test]
    async fn test_clear() {
        let applicants = applicants();
        applicants.store(&jane()).await.unwrap();
        applicants.clear().await.unwrap();

        assert_eq!(applicants.load().await.unwrap(), None);
    }
}
