//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, upper-cased
//! catalog codes, bounded scores) so that once a value reaches the domain
//! layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use phonenumber::{Mode, country, parse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
    /// Numeric value fell outside of its allowed range.
    #[error("{name} must be between {min} and {max}")]
    OutOfRange { name: &'static str, min: f64, max: f64 },
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(AdmissionBlockId, "Unique identifier for an admission block.");
id_newtype!(MajorId, "Unique identifier for a major.");
id_newtype!(RegionId, "Unique identifier for a priority region.");
id_newtype!(AdmissionYearId, "Unique identifier for an admission year.");
id_newtype!(CriterionId, "Unique identifier for an admission criterion.");
id_newtype!(QuotaId, "Unique identifier for an enrolment quota.");
id_newtype!(ApplicantId, "Unique identifier for an applicant profile.");
id_newtype!(LearningRecordId, "Unique identifier for a learning history row.");
id_newtype!(TranscriptScoreId, "Unique identifier for a transcript score.");

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a sanitized, trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let sanitized = ammonia::clean(&value.into());
                let inner = NonEmptyString::new(sanitized)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

non_empty_string_newtype!(
    DisplayName,
    "Human readable name of a catalog record or person."
);
non_empty_string_newtype!(SubjectName, "Name of an examination subject.");
non_empty_string_newtype!(SchoolName, "Name of a high school.");

/// Short catalog code such as `A00` or `KV2NT`, stored upper-cased.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CatalogCode(String);

impl CatalogCode {
    pub const MAX_LEN: usize = 20;

    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let code = NonEmptyString::new(value)?.into_inner().to_uppercase();
        let valid = code.len() <= Self::MAX_LEN
            && code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(TypeConstraintError::InvalidValue(format!(
                "catalog code `{code}`"
            )));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for CatalogCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for CatalogCode {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ContactEmail(String);

impl ContactEmail {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ContactEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalizes a phone number string to E.164 format.
///
/// Numbers without an international prefix are read as Vietnamese numbers.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let parsed =
        parse(Some(country::Id::VN), trimmed).map_err(|_| TypeConstraintError::InvalidPhone)?;
    if !phonenumber::is_valid(&parsed) {
        return Err(TypeConstraintError::InvalidPhone);
    }
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Normalized phone number wrapper (expected E.164).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Constructs a phone number ensuring it is valid and normalizes to E.164 format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_phone_to_e164(&value.into())?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Citizen identity number: 9 digits (old ID card) or 12 digits (CCCD).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NationalId(String);

impl NationalId {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into().trim().to_string();
        let digits = value.chars().all(|c| c.is_ascii_digit());
        if digits && matches!(value.len(), 9 | 12) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidValue(
                "national id must have 9 or 12 digits".to_string(),
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! bounded_newtype {
    ($name:ident, $inner:ty, $min:expr, $max:expr, $label:expr) => {
        #[doc = concat!("Value of `", $label, "` limited to `", stringify!($min), "..=", stringify!($max), "`.")]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
        pub struct $name($inner);

        impl $name {
            pub const MIN: $inner = $min;
            pub const MAX: $inner = $max;

            pub fn new(value: $inner) -> Result<Self, TypeConstraintError> {
                if (Self::MIN..=Self::MAX).contains(&value) {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::OutOfRange {
                        name: $label,
                        min: Self::MIN as f64,
                        max: Self::MAX as f64,
                    })
                }
            }

            pub const fn get(self) -> $inner {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

bounded_newtype!(Score, f64, 0.0, 10.0, "score");
bounded_newtype!(BonusPoints, f64, 0.0, 5.0, "bonus points");
bounded_newtype!(Grade, i32, 10, 12, "grade");
bounded_newtype!(Semester, i32, 1, 2, "semester");
bounded_newtype!(YearNumber, i32, 2000, 2100, "year");
bounded_newtype!(QuotaAmount, i32, 0, 100_000, "quota");

/// School year written as `2022-2023`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SchoolYear(String);

impl SchoolYear {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into().trim().to_string();
        let invalid = || TypeConstraintError::InvalidValue(format!("school year `{value}`"));

        let (from, to) = value.split_once('-').ok_or_else(invalid)?;
        let from: i32 = from.trim().parse().map_err(|_| invalid())?;
        let to: i32 = to.trim().parse().map_err(|_| invalid())?;
        YearNumber::new(from)?;
        if to != from + 1 {
            return Err(invalid());
        }

        Ok(Self(format!("{from}-{to}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "gender `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_positive() {
        assert!(MajorId::new(1).is_ok());
        assert_eq!(MajorId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(QuotaId::try_from(-5), Err(TypeConstraintError::NonPositiveId));
    }

    #[test]
    fn catalog_codes_are_upper_cased() {
        let code = CatalogCode::new(" a00 ").expect("valid code");
        assert_eq!(code.as_str(), "A00");

        assert!(CatalogCode::new("").is_err());
        assert!(CatalogCode::new("A 00").is_err());
        assert!(CatalogCode::new("X".repeat(21)).is_err());
    }

    #[test]
    fn names_are_sanitized() {
        let name = DisplayName::new("  Khối <script>x</script>A00 ").expect("valid name");
        assert_eq!(name.as_str(), "Khối A00");
        assert!(DisplayName::new("<script></script>").is_err());
    }

    #[test]
    fn emails_are_normalized() {
        let email = ContactEmail::new(" Student@Example.COM ").expect("valid email");
        assert_eq!(email.as_str(), "student@example.com");
        assert_eq!(
            ContactEmail::new("not-an-email"),
            Err(TypeConstraintError::InvalidEmail)
        );
    }

    #[test]
    fn local_phone_numbers_become_e164() {
        let phone = PhoneNumber::new("0912 345 678").expect("valid phone");
        assert_eq!(phone.as_str(), "+84912345678");
        assert!(PhoneNumber::new("12").is_err());
    }

    #[test]
    fn national_ids_have_nine_or_twelve_digits() {
        assert!(NationalId::new("012345678").is_ok());
        assert!(NationalId::new("001203004005").is_ok());
        assert!(NationalId::new("0012030040").is_err());
        assert!(NationalId::new("00120300400A").is_err());
    }

    #[test]
    fn bounded_values_reject_out_of_range() {
        assert!(Score::new(9.75).is_ok());
        assert!(Score::new(10.5).is_err());
        assert!(Grade::new(9).is_err());
        assert!(Semester::new(2).is_ok());
        assert_eq!(
            YearNumber::new(1999).unwrap_err().to_string(),
            "year must be between 2000 and 2100"
        );
    }

    #[test]
    fn school_years_span_consecutive_years() {
        assert_eq!(
            SchoolYear::new("2022 - 2023").expect("valid year").as_str(),
            "2022-2023"
        );
        assert!(SchoolYear::new("2022-2024").is_err());
        assert!(SchoolYear::new("2022").is_err());
    }

    #[test]
    fn gender_parses_case_insensitively() {
        assert_eq!("Female".parse::<Gender>(), Ok(Gender::Female));
        assert!("unknown".parse::<Gender>().is_err());
    }
}
