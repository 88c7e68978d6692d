//! Services behind the quota screen.

use crate::domain::quota::{NewQuota, QuotaView};
use crate::domain::types::QuotaId;
use crate::dto::quotas::{QuotaModalData, QuotasPageData};
use crate::dto::{ListPageData, ListQuery};
use crate::forms::quotas::QuotaForm;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{
    AdmissionBlockReader, AdmissionYearReader, MajorReader, QuotaReader, QuotaWriter,
};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Loads a page of quotas together with the options of the add form.
pub fn list_quotas<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ListQuery,
    default_per_page: usize,
) -> ServiceResult<QuotasPageData>
where
    R: QuotaReader + MajorReader + AdmissionBlockReader + AdmissionYearReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut state = query.into_state(default_per_page)?;

    let quotas = repo.list_quotas().map_err(|err| {
        log::error!("Failed to list quotas: {err}");
        err
    })?;

    let list = Paginated::from_collection(quotas, &mut state, QuotaView::SEARCH_FIELDS);

    Ok(QuotasPageData {
        page: ListPageData::new(list, &state),
        majors: repo.list_majors()?,
        blocks: repo.list_admission_blocks()?,
        years: repo.list_admission_years()?,
    })
}

pub fn load_quota_modal<R>(
    repo: &R,
    user: &AuthenticatedUser,
    quota_id: i32,
) -> ServiceResult<QuotaModalData>
where
    R: QuotaReader + MajorReader + AdmissionBlockReader + AdmissionYearReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let quota = repo
        .get_quota_by_id(QuotaId::new(quota_id)?)?
        .ok_or(ServiceError::NotFound)?;

    Ok(QuotaModalData {
        quota,
        majors: repo.list_majors()?,
        blocks: repo.list_admission_blocks()?,
        years: repo.list_admission_years()?,
    })
}

pub fn add_quota<R>(repo: &R, user: &AuthenticatedUser, form: QuotaForm) -> ServiceResult<()>
where
    R: QuotaWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let quota = NewQuota::try_from(form)?;

    repo.create_quota(&quota).map_err(|err| {
        log::error!("Failed to create quota: {err}");
        err
    })?;

    Ok(())
}

pub fn save_quota<R>(
    repo: &R,
    user: &AuthenticatedUser,
    quota_id: i32,
    form: QuotaForm,
) -> ServiceResult<()>
where
    R: QuotaWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let quota_id = QuotaId::new(quota_id)?;
    let quota = NewQuota::try_from(form)?;

    repo.update_quota(quota_id, &quota).map_err(|err| {
        log::error!("Failed to update quota {quota_id}: {err}");
        err
    })?;

    Ok(())
}

pub fn delete_quota<R>(repo: &R, user: &AuthenticatedUser, quota_id: i32) -> ServiceResult<()>
where
    R: QuotaWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let quota_id = QuotaId::new(quota_id)?;

    repo.delete_quota(quota_id).map_err(|err| {
        log::error!("Failed to delete quota {quota_id}: {err}");
        err
    })?;

    Ok(())
}

/// Renders every quota as CSV, newest year first.
pub fn export_quotas<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<u8>>
where
    R: QuotaReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let quotas = repo.list_quotas()?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["year", "major_code", "major_name", "block_code", "amount"])
        .map_err(|e| ServiceError::Internal(e.to_string()))?;
    for view in &quotas {
        let amount = view.quota.amount.get().to_string();
        writer
            .write_record([
                view.year.as_str(),
                view.major_code.as_str(),
                view.major_name.as_str(),
                view.block_code.as_str(),
                amount.as_str(),
            ])
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| ServiceError::Internal(e.to_string()))
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::quota::Quota;
    use crate::domain::types::{AdmissionBlockId, AdmissionYearId, MajorId, QuotaAmount};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{admin_user, staff_user};

    fn view(id: i32, major_code: &str, block_code: &str, amount: i32) -> QuotaView {
        QuotaView {
            quota: Quota {
                id: QuotaId::new(id).unwrap(),
                major_id: MajorId::new(1).unwrap(),
                admission_block_id: AdmissionBlockId::new(1).unwrap(),
                admission_year_id: AdmissionYearId::new(1).unwrap(),
                amount: QuotaAmount::new(amount).unwrap(),
            },
            major_code: major_code.to_string(),
            major_name: "Công nghệ thông tin".to_string(),
            block_code: block_code.to_string(),
            year: "2025".to_string(),
        }
    }

    #[test]
    fn list_includes_form_options() {
        let mut repo = MockRepository::new();
        repo.expect_list_quotas()
            .times(1)
            .returning(|| Ok(vec![view(1, "7480201", "A00", 120), view(2, "7480201", "D01", 40)]));
        repo.expect_list_majors().times(1).returning(|| Ok(vec![]));
        repo.expect_list_admission_blocks()
            .times(1)
            .returning(|| Ok(vec![]));
        repo.expect_list_admission_years()
            .times(1)
            .returning(|| Ok(vec![]));

        let query = ListQuery {
            q: Some("d01".to_string()),
            ..ListQuery::default()
        };
        let data = list_quotas(&repo, &staff_user(), query, 20).unwrap();

        assert_eq!(data.page.list.total_items, 1);
        assert_eq!(data.page.list.items[0].block_code, "D01");
    }

    #[test]
    fn duplicate_combination_is_a_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_create_quota()
            .times(1)
            .returning(|_| Err(RepositoryError::ConstraintViolation("unique".to_string())));
        let form = QuotaForm {
            major_id: 1,
            admission_block_id: 1,
            admission_year_id: 1,
            amount: 100,
        };

        assert!(matches!(
            add_quota(&repo, &admin_user(), form),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn export_lists_amounts() {
        let mut repo = MockRepository::new();
        repo.expect_list_quotas()
            .times(1)
            .returning(|| Ok(vec![view(1, "7480201", "A00", 120)]));

        let text = String::from_utf8(export_quotas(&repo, &staff_user()).unwrap()).unwrap();

        assert_eq!(
            text,
            "year,major_code,major_name,block_code,amount\n2025,7480201,Công nghệ thông tin,A00,120\n"
        );
    }
}
