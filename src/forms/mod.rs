//! Form definitions backing the admission portal routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod admission_blocks;
pub mod admission_years;
pub mod applicant;
pub mod criteria;
pub mod majors;
pub mod quotas;
pub mod regions;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid identifier")]
    InvalidId,

    #[error("invalid code")]
    InvalidCode,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid national id")]
    InvalidNationalId,

    #[error("invalid date")]
    InvalidDate,

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("invalid file: {0}")]
    InvalidFile(String),

    #[error("invalid csv: {0}")]
    Csv(String),
}

/// Treats a blank optional text input as absent.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
