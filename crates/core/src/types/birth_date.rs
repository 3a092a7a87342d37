//! Birth date type.

use core::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`BirthDate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BirthDateError {
    /// The input is empty after trimming.
    #[error("birth date cannot be empty")]
    Empty,
    /// The input is not a real calendar date in `YYYY-MM-DD` form.
    #[error("{0:?} is not a valid date (expected YYYY-MM-DD)")]
    InvalidFormat(String),
    /// The year has no four-digit `YYYY` form.
    #[error("year {0} is outside 0000..=9999")]
    YearOutOfRange(i32),
}

/// A calendar date with no time component.
///
/// The textual form is exactly `YYYY-MM-DD`, zero padded. That text is what
/// the form accepts, what the session stores, and what the API returns, so
/// there is one representation to parse and one to print.
///
/// ```
/// use applicant_intake_core::BirthDate;
///
/// let date = BirthDate::parse("1990-05-14").unwrap();
/// assert_eq!(date.to_string(), "1990-05-14");
///
/// assert!(BirthDate::parse("1990-5-14").is_err());
/// assert!(BirthDate::parse("1990-02-30").is_err());
/// assert!(BirthDate::parse("not-a-date").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    /// `chrono` format string of the textual form.
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// Parse a `BirthDate` from `YYYY-MM-DD` text.
    ///
    /// # Errors
    ///
    /// Returns [`BirthDateError::Empty`] for blank input and
    /// [`BirthDateError::InvalidFormat`] for anything that is not a zero
    /// padded, existing calendar date.
    pub fn parse(s: &str) -> Result<Self, BirthDateError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(BirthDateError::Empty);
        }

        // chrono accepts unpadded fields, so check the shape first.
        if !has_canonical_shape(s) {
            return Err(BirthDateError::InvalidFormat(s.to_owned()));
        }

        NaiveDate::parse_from_str(s, Self::FORMAT)
            .map(Self)
            .map_err(|_| BirthDateError::InvalidFormat(s.to_owned()))
    }

    /// Wrap an already-constructed date.
    ///
    /// # Errors
    ///
    /// Returns [`BirthDateError::YearOutOfRange`] for years that `Display`
    /// cannot write as four digits, since that text would not parse back.
    pub fn from_naive_date(date: NaiveDate) -> Result<Self, BirthDateError> {
        if !(0..=9999).contains(&date.year()) {
            return Err(BirthDateError::YearOutOfRange(date.year()));
        }
        Ok(Self(date))
    }

    /// The underlying `chrono` date.
    #[must_use]
    pub const fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

fn has_canonical_shape(s: &str) -> bool {
    s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl std::str::FromStr for BirthDate {
    type Err = BirthDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BirthDate {
    type Error = BirthDateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BirthDate> for String {
    fn from(date: BirthDate) -> Self {
        date.to_string()
    }
}

impl TryFrom<NaiveDate> for BirthDate {
    type Error = BirthDateError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_naive_date(date)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let date = BirthDate::parse("1900-08-13").unwrap();
        assert_eq!(
            date.as_naive_date(),
            NaiveDate::from_ymd_opt(1900, 8, 13).unwrap()
        );
        assert!(BirthDate::parse("2000-02-29").is_ok());
    }

    #[test]
    fn test_parse_trims() {
        assert_eq!(
            BirthDate::parse(" 1909-03-23 ").unwrap().to_string(),
            "1909-03-23"
        );
    }

    #[test]
    fn test_parse_rejects_loose_shapes() {
        for input in [
            "1990-5-14",
            "90-05-14",
            "14/05/1990",
            "1990/05/14",
            "1990-05-14T00:00:00",
            "not-a-date",
            "１９９０-05-14",
        ] {
            assert!(
                matches!(BirthDate::parse(input), Err(BirthDateError::InvalidFormat(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert!(BirthDate::parse("1990-02-30").is_err());
        assert!(BirthDate::parse("1990-13-01").is_err());
        assert!(BirthDate::parse("1999-02-29").is_err());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(BirthDate::parse(""), Err(BirthDateError::Empty));
    }

    #[test]
    fn test_display_is_zero_padded() {
        let date = BirthDate::from_naive_date(NaiveDate::from_ymd_opt(812, 1, 2).unwrap()).unwrap();
        assert_eq!(date.to_string(), "0812-01-02");
        assert_eq!(BirthDate::parse(&date.to_string()).unwrap(), date);
    }

    #[test]
    fn test_from_naive_date_range() {
        for (year, month, day) in [(0, 1, 1), (9999, 12, 31)] {
            let naive = NaiveDate::from_ymd_opt(year, month, day).unwrap();
            let date = BirthDate::try_from(naive).unwrap();
            assert_eq!(BirthDate::parse(&date.to_string()).unwrap(), date);
        }

        let err = BirthDate::try_from(NaiveDate::from_ymd_opt(10000, 1, 1).unwrap()).unwrap_err();
        assert_eq!(err, BirthDateError::YearOutOfRange(10000));

        let err = BirthDate::from_naive_date(NaiveDate::from_ymd_opt(-1, 1, 1).unwrap()).unwrap_err();
        assert_eq!(err, BirthDateError::YearOutOfRange(-1));
    }

    #[test]
    fn test_deserialize_only_accepts_text() {
        let ok: BirthDate = serde_json::from_str("\"1990-05-14\"").unwrap();
        assert_eq!(ok.to_string(), "1990-05-14");

        assert!(serde_json::from_str::<BirthDate>("\"1990-5-14\"").is_err());
        assert!(serde_json::from_str::<BirthDate>(r#"{"year":1990,"month":5,"day":14}"#).is_err());
        assert!(serde_json::from_str::<BirthDate>("19900514").is_err());
    }
}
