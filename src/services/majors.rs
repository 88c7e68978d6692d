//! Services behind the major screen, including CSV import and export.

use crate::domain::major::{Major, NewMajor};
use crate::domain::types::MajorId;
use crate::dto::{ListPageData, ListQuery};
use crate::forms::majors::{MajorForm, UploadMajorsForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{MajorReader, MajorWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub fn list_majors<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ListQuery,
    default_per_page: usize,
) -> ServiceResult<ListPageData<Major>>
where
    R: MajorReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut state = query.into_state(default_per_page)?;

    let majors = repo.list_majors().map_err(|err| {
        log::error!("Failed to list majors: {err}");
        err
    })?;

    let list = Paginated::from_collection(majors, &mut state, Major::SEARCH_FIELDS);

    Ok(ListPageData::new(list, &state))
}

pub fn load_major_modal<R>(repo: &R, user: &AuthenticatedUser, major_id: i32) -> ServiceResult<Major>
where
    R: MajorReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    repo.get_major_by_id(MajorId::new(major_id)?)?
        .ok_or(ServiceError::NotFound)
}

pub fn add_major<R>(repo: &R, user: &AuthenticatedUser, form: MajorForm) -> ServiceResult<Major>
where
    R: MajorWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let major = NewMajor::try_from(form)?;

    let created = repo.create_major(&major).map_err(|err| {
        log::error!("Failed to create major {}: {err}", major.code);
        err
    })?;

    log::info!("Major {} created by {}", created.code, user.email);
    Ok(created)
}

pub fn save_major<R>(
    repo: &R,
    user: &AuthenticatedUser,
    major_id: i32,
    form: MajorForm,
) -> ServiceResult<Major>
where
    R: MajorWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let major_id = MajorId::new(major_id)?;
    let major = NewMajor::try_from(form)?;

    repo.update_major(major_id, &major).map_err(|err| {
        log::error!("Failed to update major {major_id}: {err}");
        err.into()
    })
}

pub fn delete_major<R>(repo: &R, user: &AuthenticatedUser, major_id: i32) -> ServiceResult<()>
where
    R: MajorWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let major_id = MajorId::new(major_id)?;

    repo.delete_major(major_id).map_err(|err| {
        log::error!("Failed to delete major {major_id}: {err}");
        err
    })?;

    log::info!("Major {major_id} deleted by {}", user.email);
    Ok(())
}

/// Imports majors from the uploaded CSV. Existing codes are overwritten.
///
/// Returns the number of rows written.
pub fn upload_majors<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &mut UploadMajorsForm,
) -> ServiceResult<usize>
where
    R: MajorWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let majors = form.parse().map_err(|err| {
        log::error!("Failed to parse majors: {err}");
        err
    })?;

    import_majors(repo, &majors)
}

fn import_majors<R>(repo: &R, majors: &[NewMajor]) -> ServiceResult<usize>
where
    R: MajorWriter + ?Sized,
{
    if majors.is_empty() {
        return Err(ServiceError::Form("Tệp CSV không có dòng dữ liệu nào".to_string()));
    }

    let written = repo.upsert_majors(majors).map_err(|err| {
        log::error!("Failed to import majors: {err}");
        err
    })?;

    log::info!("Imported {written} majors");
    Ok(written)
}

/// Renders every major as CSV with a `code,name,description` header.
pub fn export_majors<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<u8>>
where
    R: MajorReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let majors = repo.list_majors()?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["code", "name", "description"])
        .map_err(|e| ServiceError::Internal(e.to_string()))?;
    for major in &majors {
        writer
            .write_record([
                major.code.as_str(),
                major.name.as_str(),
                major.description.as_deref().unwrap_or_default(),
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
    use crate::domain::types::{CatalogCode, DisplayName};
    use crate::forms::majors::parse_majors_csv;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{admin_user, staff_user};

    fn major(id: i32, code: &str, name: &str, description: Option<&str>) -> Major {
        Major {
            id: MajorId::new(id).unwrap(),
            code: CatalogCode::new(code).unwrap(),
            name: DisplayName::new(name).unwrap(),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let mut repo = MockRepository::new();
        repo.expect_list_majors().times(1).returning(|| {
            Ok(vec![
                major(1, "7480201", "Công nghệ thông tin", None),
                major(2, "7340101", "Quản trị kinh doanh", None),
            ])
        });

        let query = ListQuery {
            q: Some("THÔNG TIN".to_string()),
            ..ListQuery::default()
        };
        let data = list_majors(&repo, &staff_user(), query, 20).unwrap();

        assert_eq!(data.list.total_items, 1);
        assert_eq!(data.list.items[0].code.as_str(), "7480201");
    }

    #[test]
    fn import_upserts_parsed_rows() {
        let mut repo = MockRepository::new();
        repo.expect_upsert_majors()
            .withf(|majors| majors.len() == 2 && majors[1].code.as_str() == "7340101")
            .times(1)
            .returning(|majors| Ok(majors.len()));

        let majors = parse_majors_csv(
            "code,name,description\n7480201,Công nghệ thông tin,\n7340101,Quản trị kinh doanh,\n",
        )
        .unwrap();

        assert_eq!(import_majors(&repo, &majors).unwrap(), 2);
    }

    #[test]
    fn import_of_empty_file_is_a_form_error() {
        let mut repo = MockRepository::new();
        repo.expect_upsert_majors().times(0);

        assert!(matches!(
            import_majors(&repo, &[]),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn export_writes_header_and_rows() {
        let mut repo = MockRepository::new();
        repo.expect_list_majors().times(1).returning(|| {
            Ok(vec![major(
                1,
                "7480201",
                "Công nghệ thông tin",
                Some("Kỹ sư, cử nhân"),
            )])
        });

        let bytes = export_majors(&repo, &staff_user()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(
            text,
            "code,name,description\n7480201,Công nghệ thông tin,\"Kỹ sư, cử nhân\"\n"
        );
    }

    #[test]
    fn save_requires_admin_role() {
        let mut repo = MockRepository::new();
        repo.expect_update_major().times(0);
        let form = MajorForm {
            code: "7480201".to_string(),
            name: "CNTT".to_string(),
            description: None,
        };

        let result = save_major(&repo, &staff_user(), 1, form);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn delete_passes_id_to_repository() {
        let mut repo = MockRepository::new();
        repo.expect_delete_major()
            .withf(|id| id.get() == 5)
            .times(1)
            .returning(|_| Ok(()));

        delete_major(&repo, &admin_user(), 5).unwrap();
    }

    #[test]
    fn delete_of_referenced_major_is_a_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_delete_major().times(1).returning(|_| {
            Err(RepositoryError::ConstraintViolation(
                "record is still referenced: FOREIGN KEY constraint failed".to_string(),
            ))
        });

        let result = delete_major(&repo, &admin_user(), 5);

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }
}
