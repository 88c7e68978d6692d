//! Services behind the admission year screen.

use crate::domain::admission_year::{AdmissionYear, NewAdmissionYear};
use crate::domain::types::AdmissionYearId;
use crate::dto::{ListPageData, ListQuery};
use crate::forms::admission_years::AdmissionYearForm;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{AdmissionYearReader, AdmissionYearWriter};
use crate::services::{ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub fn list_admission_years<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ListQuery,
    default_per_page: usize,
) -> ServiceResult<ListPageData<AdmissionYear>>
where
    R: AdmissionYearReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut state = query.into_state(default_per_page)?;

    let years = repo.list_admission_years().map_err(|err| {
        log::error!("Failed to list admission years: {err}");
        err
    })?;

    let list = Paginated::from_collection(years, &mut state, AdmissionYear::SEARCH_FIELDS);

    Ok(ListPageData::new(list, &state))
}

/// Adds an inactive year; activation is a separate step.
pub fn add_admission_year<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AdmissionYearForm,
) -> ServiceResult<AdmissionYear>
where
    R: AdmissionYearWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let year = NewAdmissionYear::try_from(form)?;

    let created = repo.create_admission_year(&year).map_err(|err| {
        log::error!("Failed to create admission year {}: {err}", year.year);
        err
    })?;

    log::info!("Admission year {} created by {}", created.year, user.email);
    Ok(created)
}

/// Makes `year_id` the only active admission year.
pub fn activate_admission_year<R>(
    repo: &R,
    user: &AuthenticatedUser,
    year_id: i32,
) -> ServiceResult<AdmissionYear>
where
    R: AdmissionYearWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let year_id = AdmissionYearId::new(year_id)?;

    let year = repo.activate_admission_year(year_id).map_err(|err| {
        log::error!("Failed to activate admission year {year_id}: {err}");
        err
    })?;

    log::info!("Admission year {} activated by {}", year.year, user.email);
    Ok(year)
}

pub fn delete_admission_year<R>(
    repo: &R,
    user: &AuthenticatedUser,
    year_id: i32,
) -> ServiceResult<()>
where
    R: AdmissionYearWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let year_id = AdmissionYearId::new(year_id)?;

    repo.delete_admission_year(year_id).map_err(|err| {
        log::error!("Failed to delete admission year {year_id}: {err}");
        err
    })?;

    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::types::YearNumber;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;
    use crate::services::test_support::{admin_user, staff_user};

    #[test]
    fn year_is_searchable_by_its_label() {
        let mut repo = MockRepository::new();
        repo.expect_list_admission_years().times(1).returning(|| {
            Ok((2020..=2025)
                .rev()
                .map(|y| {
                    AdmissionYear::new(
                        AdmissionYearId::new(y - 2019).unwrap(),
                        YearNumber::new(y).unwrap(),
                        y == 2025,
                    )
                })
                .collect())
        });

        let query = ListQuery {
            q: Some("2024".to_string()),
            ..ListQuery::default()
        };
        let data = list_admission_years(&repo, &staff_user(), query, 20).unwrap();

        assert_eq!(data.list.total_items, 1);
        assert!(!data.list.items[0].is_active);
    }

    #[test]
    fn year_outside_range_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_create_admission_year().times(0);

        let result = add_admission_year(&repo, &admin_user(), AdmissionYearForm { year: 1999 });

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn activation_goes_through_repository() {
        let mut repo = MockRepository::new();
        repo.expect_activate_admission_year()
            .withf(|id| id.get() == 3)
            .times(1)
            .returning(|id| Ok(AdmissionYear::new(id, YearNumber::new(2025).unwrap(), true)));

        let year = activate_admission_year(&repo, &admin_user(), 3).unwrap();

        assert!(year.is_active);
    }

    #[test]
    fn staff_cannot_activate() {
        let mut repo = MockRepository::new();
        repo.expect_activate_admission_year().times(0);

        assert!(matches!(
            activate_admission_year(&repo, &staff_user(), 3),
            Err(ServiceError::Unauthorized)
        ));
    }
}
