//! Repository implementation for admission criteria.

use diesel::prelude::*;

use crate::domain::criterion::{Criterion, NewCriterion};
use crate::domain::types::CriterionId;
use crate::models::criterion::{Criterion as DbCriterion, NewCriterion as DbNewCriterion};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CriterionReader, CriterionWriter, DieselRepository};

impl CriterionReader for DieselRepository {
    fn list_criteria(&self) -> RepositoryResult<Vec<Criterion>> {
        use crate::schema::criteria;

        let mut conn = self.conn()?;
        criteria::table
            .order(criteria::code.asc())
            .load::<DbCriterion>(&mut conn)?
            .into_iter()
            .map(|row| Criterion::try_from(row).map_err(RepositoryError::from))
            .collect()
    }

    fn get_criterion_by_id(&self, id: CriterionId) -> RepositoryResult<Option<Criterion>> {
        use crate::schema::criteria;

        let mut conn = self.conn()?;
        let row = criteria::table
            .find(id.get())
            .first::<DbCriterion>(&mut conn)
            .optional()?;

        row.map(|row| Criterion::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }
}

impl CriterionWriter for DieselRepository {
    fn create_criterion(&self, criterion: &NewCriterion) -> RepositoryResult<Criterion> {
        use crate::schema::criteria;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(criteria::table)
            .values(DbNewCriterion::from(criterion))
            .get_result::<DbCriterion>(&mut conn)?;

        Ok(Criterion::try_from(row)?)
    }

    fn update_criterion(
        &self,
        id: CriterionId,
        criterion: &NewCriterion,
    ) -> RepositoryResult<Criterion> {
        use crate::schema::criteria;

        let mut conn = self.conn()?;
        let row = diesel::update(criteria::table.find(id.get()))
            .set(DbNewCriterion::from(criterion))
            .get_result::<DbCriterion>(&mut conn)?;

        Ok(Criterion::try_from(row)?)
    }

    fn delete_criterion(&self, id: CriterionId) -> RepositoryResult<()> {
        use crate::schema::criteria;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(criteria::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
