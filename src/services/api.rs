//! Services backing the JSON API.

use crate::domain::major::Major;
use crate::dto::ListQuery;
use crate::dto::api::MajorsResponse;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::MajorReader;
use crate::services::{ServiceError, ServiceResult, check_role};
use crate::{APPLICANT_ROLE, SERVICE_ACCESS_ROLE};

/// Returns one page of majors for staff and applicants alike.
pub fn list_majors<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ListQuery,
    default_per_page: usize,
) -> ServiceResult<MajorsResponse>
where
    R: MajorReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) && !check_role(APPLICANT_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let mut state = query.into_state(default_per_page)?;
    let majors = repo.list_majors()?;
    let page = Paginated::from_collection(majors, &mut state, Major::SEARCH_FIELDS);

    Ok(MajorsResponse {
        total: page.total_items,
        page: page.page,
        total_pages: page.total_pages,
        majors: page.items,
    })
}
