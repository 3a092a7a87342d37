//! Applicant form submission and validation.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::ApplicantRecord;
use crate::types::{BirthDate, BirthDateError, Email, Gender, NameError, PersonName};

const REQUIRED: &str = "This field is required.";

/// Raw applicant form fields, exactly as an HTTP form delivers them.
///
/// Missing fields deserialize as empty strings so that they surface as
/// "required" errors from [`validate`](Self::validate) rather than as
/// extractor rejections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicantForm {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub birthday: String,
    pub email: String,
}

/// A single field's validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Form field name.
    pub field: &'static str,
    /// Message shown next to the field.
    pub message: String,
}

/// All validation failures of one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Returns `true` if no field failed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failed fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.errors.len()
    }

    /// All errors in form order.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The message for one field, if it failed.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Names of the failed fields, for logging.
    #[must_use]
    pub fn field_names(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.field).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid applicant submission")?;
        for (i, error) in self.errors.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{} ({})", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl ApplicantForm {
    /// Validate the submitted text and build an [`ApplicantRecord`].
    ///
    /// Every field is checked and all failures are reported together. On
    /// success every field of the returned record is set.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing each field that failed.
    pub fn validate(&self) -> Result<ApplicantRecord, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let first_name = name_field(&mut errors, "first_name", &self.first_name);
        let last_name = name_field(&mut errors, "last_name", &self.last_name);

        let gender = if self.gender.trim().is_empty() {
            errors.push("gender", REQUIRED);
            None
        } else {
            Gender::parse(&self.gender)
                .map_err(|_| {
                    errors.push(
                        "gender",
                        format!(
                            "Select a valid choice. {} is not one of the available choices.",
                            self.gender.trim()
                        ),
                    );
                })
                .ok()
        };

        let birthday = match BirthDate::parse(&self.birthday) {
            Ok(date) => Some(date),
            Err(BirthDateError::Empty) => {
                errors.push("birthday", REQUIRED);
                None
            }
            Err(BirthDateError::InvalidFormat(_) | BirthDateError::YearOutOfRange(_)) => {
                errors.push("birthday", "Enter a valid date (YYYY-MM-DD).");
                None
            }
        };

        let email = if self.email.trim().is_empty() {
            errors.push("email", REQUIRED);
            None
        } else {
            Email::parse(&self.email)
                .map_err(|e| errors.push("email", format!("Enter a valid email address: {e}.")))
                .ok()
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ApplicantRecord {
            first_name,
            last_name,
            gender,
            birthday,
            email,
        })
    }

    /// Pre-filled form text for a stored record.
    #[must_use]
    pub fn from_record(record: &ApplicantRecord) -> Self {
        fn text<T: ToString>(value: Option<&T>) -> String {
            value.map(ToString::to_string).unwrap_or_default()
        }

        Self {
            first_name: text(record.first_name.as_ref()),
            last_name: text(record.last_name.as_ref()),
            gender: text(record.gender.as_ref()),
            birthday: text(record.birthday.as_ref()),
            email: text(record.email.as_ref()),
        }
    }
}

fn name_field(errors: &mut ValidationErrors, field: &'static str, raw: &str) -> Option<PersonName> {
    match PersonName::parse(raw) {
        Ok(name) => Some(name),
        Err(NameError::Empty) => {
            errors.push(field, REQUIRED);
            None
        }
        Err(e @ NameError::TooLong { .. }) => {
            errors.push(field, format!("Ensure this value is valid: {e}."));
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn jane() -> ApplicantForm {
        ApplicantForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            gender: "f".to_string(),
            birthday: "1990-05-14".to_string(),
            email: "jane@example.com".to_string(),
        }
    }

    #[test]
    fn test_validate_valid_submission() {
        let record = jane().validate().unwrap();

        assert_eq!(record.first_name.unwrap().as_str(), "Jane");
        assert_eq!(record.last_name.unwrap().as_str(), "Doe");
        assert_eq!(record.gender, Some(Gender::Female));
        assert_eq!(record.birthday.unwrap().to_string(), "1990-05-14");
        assert_eq!(record.email.unwrap().as_str(), "jane@example.com");
    }

    #[test]
    fn test_validate_trims_whitespace() {
        let form = ApplicantForm {
            first_name: "  Jane ".to_string(),
            birthday: " 1990-05-14\n".to_string(),
            ..jane()
        };
        let record = form.validate().unwrap();
        assert_eq!(record.first_name.unwrap().as_str(), "Jane");
        assert_eq!(record.birthday.unwrap().to_string(), "1990-05-14");
    }

    #[test]
    fn test_validate_rejects_bad_birthday() {
        let form = ApplicantForm {
            birthday: "not-a-date".to_string(),
            ..jane()
        };
        let errors = form.validate().unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.for_field("birthday"),
            Some("Enter a valid date (YYYY-MM-DD).")
        );
    }

    #[test]
    fn test_validate_collects_every_error() {
        let errors = ApplicantForm::default().validate().unwrap_err();

        assert_eq!(
            errors.field_names(),
            vec!["first_name", "last_name", "gender", "birthday", "email"]
        );
        assert!(errors.errors().iter().all(|e| e.message == REQUIRED));
    }

    #[test]
    fn test_validate_rejects_unknown_gender() {
        let form = ApplicantForm {
            gender: "x".to_string(),
            ..jane()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.for_field("gender").unwrap().contains("x is not one of"));
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let form = ApplicantForm {
            email: "jane-at-example".to_string(),
            ..jane()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.for_field("email").is_some());
        assert!(errors.for_field("birthday").is_none());
    }

    #[test]
    fn test_from_record_round_trips_through_validate() {
        let record = jane().validate().unwrap();
        let refilled = ApplicantForm::from_record(&record);

        assert_eq!(refilled, jane());
        assert_eq!(refilled.validate().unwrap(), record);
    }

    #[test]
    fn test_from_empty_record() {
        assert_eq!(
            ApplicantForm::from_record(&ApplicantRecord::default()),
            ApplicantForm::default()
        );
    }

    #[test]
    fn test_display_lists_fields() {
        let form = ApplicantForm {
            birthday: "1990-5-14".to_string(),
            email: String::new(),
            ..jane()
        };
        let message = form.validate().unwrap_err().to_string();
        assert!(message.starts_with("invalid applicant submission: birthday"));
        assert!(message.contains("; email (This field is required.)"));
    }
}
