//! Core types for applicant data.
//!
//! Each type can only be built through a fallible `parse`, and each one
//! deserializes through that same `parse`.

pub mod birth_date;
pub mod email;
pub mod gender;
pub mod name;

pub use birth_date::{BirthDate, BirthDateError};
pub use email::{Email, EmailError};
pub use gender::{Gender, GenderError};
pub use name::{NameError, PersonName};
