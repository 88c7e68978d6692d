//! Repository implementation for admission years.

use diesel::prelude::*;

use crate::domain::admission_year::{AdmissionYear, NewAdmissionYear};
use crate::domain::types::AdmissionYearId;
use crate::models::admission_year::{
    AdmissionYear as DbAdmissionYear, NewAdmissionYear as DbNewAdmissionYear,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AdmissionYearReader, AdmissionYearWriter, DieselRepository};

impl AdmissionYearReader for DieselRepository {
    fn list_admission_years(&self) -> RepositoryResult<Vec<AdmissionYear>> {
        use crate::schema::admission_years;

        let mut conn = self.conn()?;
        admission_years::table
            .order(admission_years::year.desc())
            .load::<DbAdmissionYear>(&mut conn)?
            .into_iter()
            .map(|row| AdmissionYear::try_from(row).map_err(RepositoryError::from))
            .collect()
    }

    fn get_admission_year_by_id(
        &self,
        id: AdmissionYearId,
    ) -> RepositoryResult<Option<AdmissionYear>> {
        use crate::schema::admission_years;

        let mut conn = self.conn()?;
        let row = admission_years::table
            .find(id.get())
            .first::<DbAdmissionYear>(&mut conn)
            .optional()?;

        row.map(|row| AdmissionYear::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }
}

impl AdmissionYearWriter for DieselRepository {
    fn create_admission_year(&self, year: &NewAdmissionYear) -> RepositoryResult<AdmissionYear> {
        use crate::schema::admission_years;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(admission_years::table)
            .values(DbNewAdmissionYear::from(year))
            .get_result::<DbAdmissionYear>(&mut conn)?;

        Ok(AdmissionYear::try_from(row)?)
    }

    fn activate_admission_year(&self, id: AdmissionYearId) -> RepositoryResult<AdmissionYear> {
        use crate::schema::admission_years;

        let mut conn = self.conn()?;

        let row = conn.transaction::<DbAdmissionYear, diesel::result::Error, _>(|conn| {
            diesel::update(admission_years::table.filter(admission_years::id.ne(id.get())))
                .set(admission_years::is_active.eq(false))
                .execute(conn)?;

            diesel::update(admission_years::table.find(id.get()))
                .set(admission_years::is_active.eq(true))
                .get_result::<DbAdmissionYear>(conn)
        })?;

        Ok(AdmissionYear::try_from(row)?)
    }

    fn delete_admission_year(&self, id: AdmissionYearId) -> RepositoryResult<()> {
        use crate::schema::admission_years;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(admission_years::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
