//! Repository implementation for enrolment quotas.

use diesel::prelude::*;

use crate::domain::quota::{NewQuota, Quota, QuotaView};
use crate::domain::types::QuotaId;
use crate::models::quota::{NewQuota as DbNewQuota, Quota as DbQuota};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, QuotaReader, QuotaWriter};

impl QuotaReader for DieselRepository {
    fn list_quotas(&self) -> RepositoryResult<Vec<QuotaView>> {
        use crate::schema::{admission_blocks, admission_years, majors, quotas};

        let mut conn = self.conn()?;
        let rows = quotas::table
            .inner_join(majors::table)
            .inner_join(admission_blocks::table)
            .inner_join(admission_years::table)
            .order((
                admission_years::year.desc(),
                majors::code.asc(),
                admission_blocks::code.asc(),
            ))
            .select((
                DbQuota::as_select(),
                majors::code,
                majors::name,
                admission_blocks::code,
                admission_years::year,
            ))
            .load::<(DbQuota, String, String, String, i32)>(&mut conn)?;

        rows.into_iter()
            .map(|(quota, major_code, major_name, block_code, year)| {
                Ok(QuotaView {
                    quota: Quota::try_from(quota)?,
                    major_code,
                    major_name,
                    block_code,
                    year: year.to_string(),
                })
            })
            .collect()
    }

    fn get_quota_by_id(&self, id: QuotaId) -> RepositoryResult<Option<Quota>> {
        use crate::schema::quotas;

        let mut conn = self.conn()?;
        let row = quotas::table
            .find(id.get())
            .first::<DbQuota>(&mut conn)
            .optional()?;

        row.map(|row| Quota::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }
}

impl QuotaWriter for DieselRepository {
    fn create_quota(&self, quota: &NewQuota) -> RepositoryResult<Quota> {
        use crate::schema::quotas;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(quotas::table)
            .values(DbNewQuota::from(quota))
            .get_result::<DbQuota>(&mut conn)?;

        Ok(Quota::try_from(row)?)
    }

    fn update_quota(&self, id: QuotaId, quota: &NewQuota) -> RepositoryResult<Quota> {
        use crate::schema::quotas;

        let mut conn = self.conn()?;
        let row = diesel::update(quotas::table.find(id.get()))
            .set(DbNewQuota::from(quota))
            .get_result::<DbQuota>(&mut conn)?;

        Ok(Quota::try_from(row)?)
    }

    fn delete_quota(&self, id: QuotaId) -> RepositoryResult<()> {
        use crate::schema::quotas;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(quotas::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
