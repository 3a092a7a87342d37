//! Applicant form route handlers.
//!
//! The form accepts text; [`ApplicantForm::validate`] is the only step that
//! parses it. Once a record is in the session it is read back through
//! [`ApplicantSession`] and rendered from the decoded record, never
//! re-validated.

use applicant_intake_core::{ApplicantForm, ApplicantRecord, Gender, ValidationErrors};
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::ApplicantSession;

// =============================================================================
// View Types
// =============================================================================

/// One text input of the form.
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub value: String,
    pub error: Option<String>,
}

/// One option of the gender select.
pub struct GenderChoice {
    pub code: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Summary of the stored applicant.
pub struct ApplicantSummary {
    pub full_name: String,
    pub gender: String,
    pub birthday: String,
    pub email: String,
}

impl From<&ApplicantRecord> for ApplicantSummary {
    fn from(record: &ApplicantRecord) -> Self {
        Self {
            full_name: record.full_name().unwrap_or_default(),
            gender: record
                .gender
                .map(|g| g.label().to_owned())
                .unwrap_or_default(),
            birthday: record
                .birthday
                .map(|d| d.to_string())
                .unwrap_or_default(),
            email: record
                .email
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }
}

/// Applicant page template.
#[derive(Template, WebTemplate)]
#[template(path = "applicant.html")]
pub struct ApplicantTemplate {
    pub fields: Vec<FieldView>,
    pub gender_choices: Vec<GenderChoice>,
    pub gender_error: Option<String>,
    pub applicant: Option<ApplicantSummary>,
    pub saved: bool,
    pub has_errors: bool,
}

impl ApplicantTemplate {
    /// Build the page for `form` text, its validation `errors`, and the
    /// currently stored record.
    fn new(
        form: &ApplicantForm,
        errors: &ValidationErrors,
        stored: Option<&ApplicantRecord>,
        saved: bool,
    ) -> Self {
        let field = |name: &'static str, label: &'static str, input_type: &'static str, value: &str| {
            FieldView {
                name,
                label,
                input_type,
                value: value.to_owned(),
                error: errors.for_field(name).map(str::to_owned),
            }
        };

        let fields = vec![
            field("first_name", "First name", "text", &form.first_name),
            field("last_name", "Last name", "text", &form.last_name),
            field("birthday", "Birthday (YYYY-MM-DD)", "text", &form.birthday),
            field("email", "Email", "email", &form.email),
        ];

        let selected = form.gender.trim();
        let gender_choices = Gender::ALL
            .into_iter()
            .map(|g| GenderChoice {
                code: g.code(),
                label: g.label(),
                selected: g.code() == selected,
            })
            .collect();

        Self {
            fields,
            gender_choices,
            gender_error: errors.for_field("gender").map(str::to_owned),
            applicant: stored.filter(|r| !r.is_empty()).map(ApplicantSummary::from),
            saved,
            has_errors: !errors.is_empty(),
        }
    }

    /// Page pre-filled from the stored record (or blank).
    fn for_stored(stored: Option<&ApplicantRecord>, saved: bool) -> Self {
        let form = stored.map(ApplicantForm::from_record).unwrap_or_default();
        Self::new(&form, &ValidationErrors::default(), stored, saved)
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Show the applicant form.
///
/// GET /applicant
#[instrument(skip(applicants))]
pub async fn show(applicants: ApplicantSession) -> Result<ApplicantTemplate> {
    let stored = applicants.load_or_discard().await?;
    Ok(ApplicantTemplate::for_stored(stored.as_ref(), false))
}

/// Submit the applicant form.
///
/// POST /applicant
///
/// A valid submission is merged into the session record. An invalid one is
/// rendered back with per-field errors and a 422 status; the session is not
/// touched.
#[instrument(skip(applicants, form))]
pub async fn submit(
    applicants: ApplicantSession,
    form: std::result::Result<Form<ApplicantForm>, FormRejection>,
) -> Result<Response> {
    let Form(form) = form.map_err(|e| AppError::BadRequest(e.body_text()))?;

    match form.validate() {
        Ok(record) => {
            let stored = applicants.update(record).await?;
            tracing::info!("Applicant stored in session");
            Ok(ApplicantTemplate::for_stored(Some(&stored), true).into_response())
        }
        Err(errors) => {
            tracing::info!(fields = ?errors.field_names(), "Applicant submission rejected");
            let stored = applicants.load_or_discard().await?;
            let page = ApplicantTemplate::new(&form, &errors, stored.as_ref(), false);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
    }
}

/// Forget the stored applicant.
///
/// POST /applicant/clear
#[instrument(skip(applicants))]
pub async fn clear(applicants: ApplicantSession) -> Result<Redirect> {
    applicants.clear().await?;
    tracing::info!("Applicant cleared from session");
    Ok(Redirect::to("/applicant"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn jane_form() -> ApplicantForm {
        ApplicantForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            gender: "f".to_string(),
            birthday: "1990-05-14".to_string(),
            email: "jane@example.com".to_string(),
        }
    }

    #[test]
    fn test_blank_page() {
        let page = ApplicantTemplate::for_stored(None, false);

        assert!(page.fields.iter().all(|f| f.value.is_empty() && f.error.is_none()));
        assert!(page.gender_choices.iter().all(|c| !c.selected));
        assert!(page.applicant.is_none());
        assert!(!page.has_errors);
    }

    #[test]
    fn test_page_prefilled_from_record() {
        let record = jane_form().validate().unwrap();
        let page = ApplicantTemplate::for_stored(Some(&record), true);

        let birthday = page.fields.iter().find(|f| f.name == "birthday").unwrap();
        assert_eq!(birthday.value, "1990-05-14");
        assert!(page.gender_choices.iter().any(|c| c.code == "f" && c.selected));

        let summary = page.applicant.as_ref().unwrap();
        assert_eq!(summary.full_name, "Jane Doe");
        assert_eq!(summary.gender, "Female");
        assert!(page.saved);
    }

    #[test]
    fn test_page_with_errors_keeps_submitted_text() {
        let form = ApplicantForm {
            birthday: "not-a-date".to_string(),
            ..jane_form()
        };
        let errors = form.validate().unwrap_err();
        let page = ApplicantTemplate::new(&form, &errors, None, false);

        let birthday = page.fields.iter().find(|f| f.name == "birthday").unwrap();
        assert_eq!(birthday.value, "not-a-date");
        assert!(birthday.error.is_some());
        assert!(page.has_errors);
    }

    #[test]
    fn test_render_escapes_values() {
        let form = ApplicantForm {
            first_name: "<script>".to_string(),
            ..jane_form()
        };
        let page = ApplicantTemplate::new(&form, &ValidationErrors::default(), None, false);
        let html = page.render().unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&#60;script&#62;") || html.contains("&lt;script&gt;"));
    }
}
