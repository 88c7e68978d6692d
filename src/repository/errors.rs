//! Errors raised by the Diesel repository.

use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Unique code taken, row still referenced by a quota, or a failed CHECK.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Prefixes SQLite puts on constraint failures, with the label we report.
///
/// SQLite does not always hand Diesel an extended result code, e.g. an
/// `ON DELETE RESTRICT` failure arrives as a plain `DatabaseError` whose
/// message is all there is to go on.
const SQLITE_CONSTRAINT_MESSAGES: [(&str, &str); 5] = [
    ("FOREIGN KEY constraint failed", "record is still referenced"),
    ("UNIQUE constraint failed", "duplicate value"),
    ("PRIMARY KEY constraint failed", "duplicate value"),
    ("NOT NULL constraint failed", "missing value"),
    ("CHECK constraint failed", "value out of range"),
];

fn constraint_label(kind: &DatabaseErrorKind, message: &str) -> Option<&'static str> {
    match kind {
        DatabaseErrorKind::UniqueViolation => Some("duplicate value"),
        DatabaseErrorKind::ForeignKeyViolation => Some("record is still referenced"),
        DatabaseErrorKind::NotNullViolation => Some("missing value"),
        DatabaseErrorKind::CheckViolation => Some("value out of range"),
        _ => SQLITE_CONSTRAINT_MESSAGES
            .iter()
            .find(|(prefix, _)| message.starts_with(prefix))
            .map(|(_, label)| *label),
    }
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(kind, info) => {
                let message = info.message();
                match constraint_label(&kind, message) {
                    Some(label) => RepositoryError::ConstraintViolation(format!("{label}: {message}")),
                    None => RepositoryError::DatabaseError(message.to_string()),
                }
            }
            DieselError::SerializationError(e) | DieselError::DeserializationError(e) => {
                RepositoryError::ValidationError(e.to_string())
            }
            DieselError::RollbackTransaction => {
                RepositoryError::DatabaseError("transaction rolled back".to_string())
            }
            other => RepositoryError::Unexpected(other.to_string()),
        }
    }
}

impl From<R2D2Error> for RepositoryError {
    fn from(err: R2D2Error) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(message.to_string()))
    }

    #[test]
    fn restrict_delete_without_extended_code_is_a_constraint_violation() {
        let err = RepositoryError::from(database_error(
            DatabaseErrorKind::Unknown,
            "FOREIGN KEY constraint failed",
        ));

        match err {
            RepositoryError::ConstraintViolation(message) => {
                assert!(message.starts_with("record is still referenced"));
            }
            other => panic!("expected constraint violation, got {other:?}"),
        }
    }

    #[test]
    fn sqlite_unique_message_is_a_constraint_violation() {
        let err = RepositoryError::from(database_error(
            DatabaseErrorKind::Unknown,
            "UNIQUE constraint failed: majors.code",
        ));

        assert!(matches!(err, RepositoryError::ConstraintViolation(_)));
    }

    #[test]
    fn classified_kind_wins_over_message() {
        let err = RepositoryError::from(database_error(
            DatabaseErrorKind::CheckViolation,
            "amount",
        ));

        assert!(matches!(err, RepositoryError::ConstraintViolation(m) if m == "value out of range: amount"));
    }

    #[test]
    fn other_database_errors_stay_database_errors() {
        let err = RepositoryError::from(database_error(
            DatabaseErrorKind::Unknown,
            "database is locked",
        ));

        assert!(matches!(err, RepositoryError::DatabaseError(m) if m == "database is locked"));
    }

    #[test]
    fn missing_row_is_not_found() {
        assert!(matches!(
            RepositoryError::from(DieselError::NotFound),
            RepositoryError::NotFound
        ));
    }
}
