//! Repository implementation for priority regions.

use diesel::prelude::*;

use crate::domain::region::{NewRegion, Region};
use crate::domain::types::RegionId;
use crate::models::region::{NewRegion as DbNewRegion, Region as DbRegion};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, RegionReader, RegionWriter};

impl RegionReader for DieselRepository {
    fn list_regions(&self) -> RepositoryResult<Vec<Region>> {
        use crate::schema::regions;

        let mut conn = self.conn()?;
        regions::table
            .order(regions::code.asc())
            .load::<DbRegion>(&mut conn)?
            .into_iter()
            .map(|row| Region::try_from(row).map_err(RepositoryError::from))
            .collect()
    }

    fn get_region_by_id(&self, id: RegionId) -> RepositoryResult<Option<Region>> {
        use crate::schema::regions;

        let mut conn = self.conn()?;
        let row = regions::table
            .find(id.get())
            .first::<DbRegion>(&mut conn)
            .optional()?;

        row.map(|row| Region::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }
}

impl RegionWriter for DieselRepository {
    fn create_region(&self, region: &NewRegion) -> RepositoryResult<Region> {
        use crate::schema::regions;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(regions::table)
            .values(DbNewRegion::from(region))
            .get_result::<DbRegion>(&mut conn)?;

        Ok(Region::try_from(row)?)
    }

    fn update_region(&self, id: RegionId, region: &NewRegion) -> RepositoryResult<Region> {
        use crate::schema::regions;

        let mut conn = self.conn()?;
        let row = diesel::update(regions::table.find(id.get()))
            .set(DbNewRegion::from(region))
            .get_result::<DbRegion>(&mut conn)?;

        Ok(Region::try_from(row)?)
    }

    fn delete_region(&self, id: RegionId) -> RepositoryResult<()> {
        use crate::schema::regions;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(regions::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
