//! JSON API route handlers.

use applicant_intake_core::PublicApplicant;
use axum::Json;
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::services::ApplicantSession;

/// Response body for `GET /api/applicant`.
#[derive(Debug, Serialize)]
pub struct ApplicantResponse {
    pub applicant: Option<PublicApplicant>,
}

/// Public view of the stored applicant.
///
/// GET /api/applicant
#[instrument(skip(applicants))]
pub async fn applicant(applicants: ApplicantSession) -> Result<Json<ApplicantResponse>> {
    let applicant = applicants
        .load_or_discard()
        .await?
        .map(|record| record.public_values());

    Ok(Json(ApplicantResponse { applicant }))
}
