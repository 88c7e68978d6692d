//! Repository implementation for majors.

use diesel::prelude::*;
use diesel::upsert::excluded;

use crate::domain::major::{Major, NewMajor};
use crate::domain::types::MajorId;
use crate::models::major::{Major as DbMajor, NewMajor as DbNewMajor};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, MajorReader, MajorWriter};

impl MajorReader for DieselRepository {
    fn list_majors(&self) -> RepositoryResult<Vec<Major>> {
        use crate::schema::majors;

        let mut conn = self.conn()?;
        majors::table
            .order(majors::code.asc())
            .load::<DbMajor>(&mut conn)?
            .into_iter()
            .map(|row| Major::try_from(row).map_err(RepositoryError::from))
            .collect()
    }

    fn get_major_by_id(&self, id: MajorId) -> RepositoryResult<Option<Major>> {
        use crate::schema::majors;

        let mut conn = self.conn()?;
        let row = majors::table
            .find(id.get())
            .first::<DbMajor>(&mut conn)
            .optional()?;

        row.map(|row| Major::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }
}

impl MajorWriter for DieselRepository {
    fn create_major(&self, major: &NewMajor) -> RepositoryResult<Major> {
        use crate::schema::majors;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(majors::table)
            .values(DbNewMajor::from(major))
            .get_result::<DbMajor>(&mut conn)?;

        Ok(Major::try_from(row)?)
    }

    fn upsert_majors(&self, majors_batch: &[NewMajor]) -> RepositoryResult<usize> {
        use crate::schema::majors;

        let mut conn = self.conn()?;
        let rows = majors_batch.iter().map(DbNewMajor::from).collect::<Vec<_>>();

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let mut affected = 0;
            for row in &rows {
                affected += diesel::insert_into(majors::table)
                    .values(row)
                    .on_conflict(majors::code)
                    .do_update()
                    .set((
                        majors::name.eq(excluded(majors::name)),
                        majors::description.eq(excluded(majors::description)),
                    ))
                    .execute(conn)?;
            }
            Ok(affected)
        })
        .map_err(RepositoryError::from)
    }

    fn update_major(&self, id: MajorId, major: &NewMajor) -> RepositoryResult<Major> {
        use crate::schema::majors;

        let mut conn = self.conn()?;
        let row = diesel::update(majors::table.find(id.get()))
            .set(DbNewMajor::from(major))
            .get_result::<DbMajor>(&mut conn)?;

        Ok(Major::try_from(row)?)
    }

    fn delete_major(&self, id: MajorId) -> RepositoryResult<()> {
        use crate::schema::majors;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(majors::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
