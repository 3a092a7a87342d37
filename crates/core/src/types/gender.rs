//! Gender choice offered by the applicant form.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned for a code outside the choice set.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GenderError {
    /// The code is not one of the available choices.
    #[error("{0:?} is not one of the available choices")]
    Unknown(String),
}

/// Gender as selected on the form. Stored and transmitted as its one-letter
/// code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
}

impl Gender {
    /// All choices in display order.
    pub const ALL: [Self; 2] = [Self::Male, Self::Female];

    /// Parse a gender from its form code.
    ///
    /// # Errors
    ///
    /// Returns [`GenderError::Unknown`] for anything but `m` or `f`.
    pub fn parse(code: &str) -> Result<Self, GenderError> {
        match code.trim() {
            "m" => Ok(Self::Male),
            "f" => Ok(Self::Female),
            other => Err(GenderError::Unknown(other.to_owned())),
        }
    }

    /// The form code (`m` / `f`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Male => "m",
            Self::Female => "f",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!(Gender::parse("m").unwrap(), Gender::Male);
        assert_eq!(Gender::parse(" f ").unwrap(), Gender::Female);
        assert_eq!(
            Gender::parse("x"),
            Err(GenderError::Unknown("x".to_string()))
        );
        assert!(Gender::parse("Male").is_err());
    }

    #[test]
    fn test_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"f\"");
        let parsed: Gender = serde_json::from_str("\"m\"").unwrap();
        assert_eq!(parsed, Gender::Male);
    }
}
