//! Services behind the admission block screen.

use crate::domain::admission_block::{AdmissionBlock, NewAdmissionBlock};
use crate::domain::types::AdmissionBlockId;
use crate::dto::{ListPageData, ListQuery};
use crate::forms::admission_blocks::AdmissionBlockForm;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{AdmissionBlockReader, AdmissionBlockWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Loads one page of admission blocks matching the search text.
pub fn list_admission_blocks<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ListQuery,
    default_per_page: usize,
) -> ServiceResult<ListPageData<AdmissionBlock>>
where
    R: AdmissionBlockReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut state = query.into_state(default_per_page)?;

    let blocks = repo.list_admission_blocks().map_err(|err| {
        log::error!("Failed to list admission blocks: {err}");
        err
    })?;

    let list = Paginated::from_collection(blocks, &mut state, AdmissionBlock::SEARCH_FIELDS);

    Ok(ListPageData::new(list, &state))
}

/// Loads the block shown in the edit modal.
pub fn load_admission_block_modal<R>(
    repo: &R,
    user: &AuthenticatedUser,
    block_id: i32,
) -> ServiceResult<AdmissionBlock>
where
    R: AdmissionBlockReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    repo.get_admission_block_by_id(AdmissionBlockId::new(block_id)?)?
        .ok_or(ServiceError::NotFound)
}

pub fn add_admission_block<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AdmissionBlockForm,
) -> ServiceResult<AdmissionBlock>
where
    R: AdmissionBlockWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let block = NewAdmissionBlock::try_from(form)?;

    let created = repo.create_admission_block(&block).map_err(|err| {
        log::error!("Failed to create admission block {}: {err}", block.code);
        err
    })?;

    log::info!("Admission block {} created by {}", created.code, user.email);
    Ok(created)
}

pub fn save_admission_block<R>(
    repo: &R,
    user: &AuthenticatedUser,
    block_id: i32,
    form: AdmissionBlockForm,
) -> ServiceResult<AdmissionBlock>
where
    R: AdmissionBlockWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let block_id = AdmissionBlockId::new(block_id)?;
    let block = NewAdmissionBlock::try_from(form)?;

    repo.update_admission_block(block_id, &block)
        .map_err(|err| {
            log::error!("Failed to update admission block {block_id}: {err}");
            err.into()
        })
}

pub fn delete_admission_block<R>(
    repo: &R,
    user: &AuthenticatedUser,
    block_id: i32,
) -> ServiceResult<()>
where
    R: AdmissionBlockWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let block_id = AdmissionBlockId::new(block_id)?;

    repo.delete_admission_block(block_id).map_err(|err| {
        log::error!("Failed to delete admission block {block_id}: {err}");
        err
    })?;

    log::info!("Admission block {block_id} deleted by {}", user.email);
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::types::{CatalogCode, DisplayName};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{admin_user, applicant_user, staff_user};

    fn block(id: i32, code: &str, name: &str) -> AdmissionBlock {
        AdmissionBlock {
            id: AdmissionBlockId::new(id).unwrap(),
            code: CatalogCode::new(code).unwrap(),
            name: DisplayName::new(name).unwrap(),
            subjects: DisplayName::new("Toán, Lý, Hóa").unwrap(),
        }
    }

    fn blocks(count: i32) -> Vec<AdmissionBlock> {
        (1..=count)
            .map(|i| block(i, &format!("B{i:02}"), &format!("Khối {i}")))
            .collect()
    }

    fn form(code: &str) -> AdmissionBlockForm {
        AdmissionBlockForm {
            code: code.to_string(),
            name: "Khối A00".to_string(),
            subjects: "Toán, Lý, Hóa".to_string(),
        }
    }

    #[test]
    fn list_requires_access_role() {
        let mut repo = MockRepository::new();
        repo.expect_list_admission_blocks().times(0);

        let result = list_admission_blocks(&repo, &applicant_user(), ListQuery::default(), 20);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn list_filters_and_paginates() {
        let mut repo = MockRepository::new();
        repo.expect_list_admission_blocks()
            .times(1)
            .returning(|| Ok(blocks(45)));

        let query = ListQuery {
            q: Some("khối".to_string()),
            page: Some(3),
            per_page: Some(20),
        };
        let data = list_admission_blocks(&repo, &staff_user(), query, 20).unwrap();

        assert_eq!(data.list.total_items, 45);
        assert_eq!(data.list.total_pages, 3);
        assert_eq!(data.list.page, 3);
        assert_eq!(data.list.items.len(), 5);
        assert_eq!(data.search_query, "khối");
    }

    #[test]
    fn list_heals_page_past_the_end() {
        let mut repo = MockRepository::new();
        repo.expect_list_admission_blocks()
            .times(1)
            .returning(|| Ok(blocks(12)));

        let query = ListQuery {
            q: Some("B1".to_string()),
            page: Some(4),
            per_page: Some(10),
        };
        let data = list_admission_blocks(&repo, &staff_user(), query, 20).unwrap();

        assert_eq!(data.list.page, 1);
        assert_eq!(data.list.total_items, 3);
        assert_eq!(data.list.items.len(), 3);
    }

    #[test]
    fn add_requires_admin_role() {
        let mut repo = MockRepository::new();
        repo.expect_create_admission_block().times(0);

        let result = add_admission_block(&repo, &staff_user(), form("A00"));

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn add_creates_block_with_normalised_code() {
        let mut repo = MockRepository::new();
        repo.expect_create_admission_block()
            .withf(|block| block.code.as_str() == "A01")
            .times(1)
            .returning(|new| {
                Ok(AdmissionBlock {
                    id: AdmissionBlockId::new(1).unwrap(),
                    code: new.code.clone(),
                    name: new.name.clone(),
                    subjects: new.subjects.clone(),
                })
            });

        let created = add_admission_block(&repo, &admin_user(), form("a01")).unwrap();

        assert_eq!(created.code.as_str(), "A01");
    }

    #[test]
    fn duplicate_code_is_reported_as_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_create_admission_block()
            .times(1)
            .returning(|_| Err(RepositoryError::ConstraintViolation("code".to_string())));

        let result = add_admission_block(&repo, &admin_user(), form("A00"));

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn modal_for_missing_block_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_admission_block_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = load_admission_block_modal(&repo, &admin_user(), 9);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn delete_rejects_non_positive_id() {
        let mut repo = MockRepository::new();
        repo.expect_delete_admission_block().times(0);

        let result = delete_admission_block(&repo, &admin_user(), 0);

        assert!(matches!(result, Err(ServiceError::TypeConstraint(_))));
    }
}
