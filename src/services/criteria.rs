//! Services behind the admission criteria screen.

use crate::domain::criterion::{Criterion, NewCriterion};
use crate::domain::types::CriterionId;
use crate::dto::{ListPageData, ListQuery};
use crate::forms::criteria::CriterionForm;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{CriterionReader, CriterionWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub fn list_criteria<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ListQuery,
    default_per_page: usize,
) -> ServiceResult<ListPageData<Criterion>>
where
    R: CriterionReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut state = query.into_state(default_per_page)?;

    let criteria = repo.list_criteria().map_err(|err| {
        log::error!("Failed to list criteria: {err}");
        err
    })?;

    let list = Paginated::from_collection(criteria, &mut state, Criterion::SEARCH_FIELDS);

    Ok(ListPageData::new(list, &state))
}

pub fn load_criterion_modal<R>(
    repo: &R,
    user: &AuthenticatedUser,
    criterion_id: i32,
) -> ServiceResult<Criterion>
where
    R: CriterionReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    repo.get_criterion_by_id(CriterionId::new(criterion_id)?)?
        .ok_or(ServiceError::NotFound)
}

pub fn add_criterion<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CriterionForm,
) -> ServiceResult<Criterion>
where
    R: CriterionWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let criterion = NewCriterion::try_from(form)?;

    let created = repo.create_criterion(&criterion).map_err(|err| {
        log::error!("Failed to create criterion {}: {err}", criterion.code);
        err
    })?;

    log::info!("Criterion {} created by {}", created.code, user.email);
    Ok(created)
}

pub fn save_criterion<R>(
    repo: &R,
    user: &AuthenticatedUser,
    criterion_id: i32,
    form: CriterionForm,
) -> ServiceResult<Criterion>
where
    R: CriterionWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let criterion_id = CriterionId::new(criterion_id)?;
    let criterion = NewCriterion::try_from(form)?;

    repo.update_criterion(criterion_id, &criterion)
        .map_err(|err| {
            log::error!("Failed to update criterion {criterion_id}: {err}");
            err.into()
        })
}

pub fn delete_criterion<R>(
    repo: &R,
    user: &AuthenticatedUser,
    criterion_id: i32,
) -> ServiceResult<()>
where
    R: CriterionWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let criterion_id = CriterionId::new(criterion_id)?;

    repo.delete_criterion(criterion_id).map_err(|err| {
        log::error!("Failed to delete criterion {criterion_id}: {err}");
        err
    })?;

    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::types::{CatalogCode, DisplayName};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{admin_user, staff_user};

    #[test]
    fn description_takes_part_in_search() {
        let mut repo = MockRepository::new();
        repo.expect_list_criteria().times(1).returning(|| {
            Ok(vec![
                Criterion {
                    id: CriterionId::new(1).unwrap(),
                    code: CatalogCode::new("HB").unwrap(),
                    name: DisplayName::new("Xét học bạ").unwrap(),
                    description: Some("Điểm trung bình lớp 12".to_string()),
                },
                Criterion {
                    id: CriterionId::new(2).unwrap(),
                    code: CatalogCode::new("THPT").unwrap(),
                    name: DisplayName::new("Xét điểm thi THPT").unwrap(),
                    description: None,
                },
            ])
        });

        let query = ListQuery {
            q: Some("lớp 12".to_string()),
            ..ListQuery::default()
        };
        let data = list_criteria(&repo, &staff_user(), query, 20).unwrap();

        assert_eq!(data.list.total_items, 1);
        assert_eq!(data.list.items[0].code.as_str(), "HB");
    }

    #[test]
    fn add_rejects_invalid_code() {
        let mut repo = MockRepository::new();
        repo.expect_create_criterion().times(0);
        let form = CriterionForm {
            code: "HB 2025".to_string(),
            name: "Xét học bạ".to_string(),
            description: None,
        };

        let result = add_criterion(&repo, &admin_user(), form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
