//! Staff-facing list and detail of applicant profiles.

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::applicant::ApplicantProfile;
use crate::domain::types::ApplicantId;
use crate::dto::profile::ApplicantDetailData;
use crate::dto::{ListPageData, ListQuery};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{ApplicantReader, RegionReader};
use crate::services::{ServiceError, ServiceResult, ensure_role};

pub fn list_applicants<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ListQuery,
    default_per_page: usize,
) -> ServiceResult<ListPageData<ApplicantProfile>>
where
    R: ApplicantReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut state = query.into_state(default_per_page)?;

    let applicants = repo.list_applicants().map_err(|err| {
        log::error!("Failed to list applicants: {err}");
        err
    })?;

    let list = Paginated::from_collection(applicants, &mut state, ApplicantProfile::SEARCH_FIELDS);

    Ok(ListPageData::new(list, &state))
}

/// Loads everything an applicant submitted, for the staff detail modal.
pub fn load_applicant_detail<R>(
    repo: &R,
    user: &AuthenticatedUser,
    applicant_id: i32,
) -> ServiceResult<ApplicantDetailData>
where
    R: ApplicantReader + RegionReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let profile = repo
        .get_applicant_by_id(ApplicantId::new(applicant_id)?)?
        .ok_or(ServiceError::NotFound)?;

    let region = match profile.region_id {
        Some(region_id) => repo.get_region_by_id(region_id)?,
        None => None,
    };

    Ok(ApplicantDetailData {
        learning_records: repo.list_learning_records(profile.id)?,
        transcript_scores: repo.list_transcript_scores(profile.id)?,
        region,
        profile,
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{applicant_user, staff_user};

    #[test]
    fn applicants_cannot_list_other_applicants() {
        let mut repo = MockRepository::new();
        repo.expect_list_applicants().times(0);

        assert!(matches!(
            list_applicants(&repo, &applicant_user(), ListQuery::default(), 20),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn empty_list_has_no_pages() {
        let mut repo = MockRepository::new();
        repo.expect_list_applicants().times(1).returning(|| Ok(vec![]));

        let query = ListQuery {
            q: Some("an".to_string()),
            page: Some(2),
            per_page: None,
        };
        let data = list_applicants(&repo, &staff_user(), query, 20).unwrap();

        assert_eq!(data.list.total_pages, 0);
        assert!(data.list.items.is_empty());
        assert!(data.list.pages.is_empty());
    }

    #[test]
    fn missing_applicant_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_applicant_by_id()
            .times(1)
            .returning(|_| Ok(None));

        assert!(matches!(
            load_applicant_detail(&repo, &staff_user(), 3),
            Err(ServiceError::NotFound)
        ));
    }
}
