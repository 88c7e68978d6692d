//! Business logic shared by the HTTP handlers.
//!
//! Every service checks the caller's role first, then talks to the
//! repository traits only, so handlers stay thin and services can be tested
//! against in-memory or mocked repositories.

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::PaginationError;
use crate::repository::errors::RepositoryError;

pub mod admission_blocks;
pub mod admission_years;
pub mod api;
pub mod applicants;
pub mod criteria;
pub mod majors;
pub mod profile;
pub mod quotas;
pub mod regions;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("form error: {0}")]
    Form(String),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),

    /// The write clashes with existing data, e.g. a duplicate code or a
    /// record still referenced by a quota.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("repository error: {0}")]
    Repository(RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ConstraintViolation(message) => ServiceError::Conflict(message),
            other => ServiceError::Repository(other),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<PaginationError> for ServiceError {
    fn from(val: PaginationError) -> Self {
        ServiceError::Internal(val.to_string())
    }
}

/// Returns `true` when `role` is present in `roles`.
pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}

/// Fails with [`ServiceError::Unauthorized`] unless the user holds `role`.
pub fn ensure_role(user: &AuthenticatedUser, role: &str) -> ServiceResult<()> {
    if check_role(role, &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_violation_becomes_conflict() {
        let err = ServiceError::from(RepositoryError::ConstraintViolation("dup".to_string()));

        assert!(matches!(err, ServiceError::Conflict(message) if message == "dup"));
    }

    #[test]
    fn missing_entity_becomes_not_found() {
        assert!(matches!(
            ServiceError::from(RepositoryError::NotFound),
            ServiceError::NotFound
        ));
    }

    #[test]
    fn ensure_role_rejects_missing_role() {
        let user = test_support::staff_user();

        assert!(ensure_role(&user, crate::SERVICE_ACCESS_ROLE).is_ok());
        assert!(matches!(
            ensure_role(&user, crate::SERVICE_ADMIN_ROLE),
            Err(ServiceError::Unauthorized)
        ));
    }
}
