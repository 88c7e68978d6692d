//! Services behind the priority region screen.

use crate::domain::region::{NewRegion, Region};
use crate::domain::types::RegionId;
use crate::dto::{ListPageData, ListQuery};
use crate::forms::regions::RegionForm;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{RegionReader, RegionWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub fn list_regions<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ListQuery,
    default_per_page: usize,
) -> ServiceResult<ListPageData<Region>>
where
    R: RegionReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut state = query.into_state(default_per_page)?;

    let regions = repo.list_regions().map_err(|err| {
        log::error!("Failed to list regions: {err}");
        err
    })?;

    let list = Paginated::from_collection(regions, &mut state, Region::SEARCH_FIELDS);

    Ok(ListPageData::new(list, &state))
}

pub fn load_region_modal<R>(
    repo: &R,
    user: &AuthenticatedUser,
    region_id: i32,
) -> ServiceResult<Region>
where
    R: RegionReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    repo.get_region_by_id(RegionId::new(region_id)?)?
        .ok_or(ServiceError::NotFound)
}

pub fn add_region<R>(repo: &R, user: &AuthenticatedUser, form: RegionForm) -> ServiceResult<Region>
where
    R: RegionWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let region = NewRegion::try_from(form)?;

    let created = repo.create_region(&region).map_err(|err| {
        log::error!("Failed to create region {}: {err}", region.code);
        err
    })?;

    log::info!("Region {} created by {}", created.code, user.email);
    Ok(created)
}

pub fn save_region<R>(
    repo: &R,
    user: &AuthenticatedUser,
    region_id: i32,
    form: RegionForm,
) -> ServiceResult<Region>
where
    R: RegionWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let region_id = RegionId::new(region_id)?;
    let region = NewRegion::try_from(form)?;

    repo.update_region(region_id, &region).map_err(|err| {
        log::error!("Failed to update region {region_id}: {err}");
        err.into()
    })
}

pub fn delete_region<R>(repo: &R, user: &AuthenticatedUser, region_id: i32) -> ServiceResult<()>
where
    R: RegionWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let region_id = RegionId::new(region_id)?;

    repo.delete_region(region_id).map_err(|err| {
        log::error!("Failed to delete region {region_id}: {err}");
        err
    })?;

    log::info!("Region {region_id} deleted by {}", user.email);
    Ok(())
}
