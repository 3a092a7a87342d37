//! The applicant value object.
//!
//! [`ApplicantRecord`] is the only in-process shape of an applicant. It is
//! built from untrusted text by [`ApplicantForm::validate`] and from session
//! storage by [`StoredApplicant::decode`].

pub mod form;
pub mod stored;

use serde::{Deserialize, Serialize};

use crate::types::{BirthDate, Email, Gender, PersonName};

pub use form::{ApplicantForm, FieldError, ValidationErrors};
pub use stored::{SCHEMA_VERSION, SessionDataError, StoredApplicant};

/// An applicant's submitted data.
///
/// Every field is optional: an absent session entry is the default record,
/// and a partial record can be merged into an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub gender: Option<Gender>,
    pub birthday: Option<BirthDate>,
    pub email: Option<Email>,
}

impl ApplicantRecord {
    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.gender.is_none()
            && self.birthday.is_none()
            && self.email.is_none()
    }

    /// Update this record from another one. Incoming `None` values are
    /// ignored; incoming `Some` values replace the existing ones.
    pub fn merge(&mut self, incoming: Self) {
        let Self {
            first_name,
            last_name,
            gender,
            birthday,
            email,
        } = incoming;

        if first_name.is_some() {
            self.first_name = first_name;
        }
        if last_name.is_some() {
            self.last_name = last_name;
        }
        if gender.is_some() {
            self.gender = gender;
        }
        if birthday.is_some() {
            self.birthday = birthday;
        }
        if email.is_some() {
            self.email = email;
        }
    }

    /// "First Last", skipping whichever part is missing.
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
            (None, None) => None,
        }
    }

    /// The end-user facing projection of this record.
    #[must_use]
    pub fn public_values(&self) -> PublicApplicant {
        PublicApplicant {
            first_name: self.first_name.as_ref().map(ToString::to_string),
            last_name: self.last_name.as_ref().map(ToString::to_string),
            gender: self.gender.map(|g| g.code().to_owned()),
            birthday: self.birthday.map(|d| d.as_naive_date().to_string()),
            email: self.email.as_ref().map(ToString::to_string),
        }
    }
}

/// Public view of an applicant, as returned by the JSON API.
///
/// Unlike [`StoredApplicant`], this shape is meant for responses only and is
/// never read back. Dates are ISO-8601; unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublicApplicant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
