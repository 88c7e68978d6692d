//! Repository implementation for admission blocks.

use diesel::prelude::*;

use crate::domain::admission_block::{AdmissionBlock, NewAdmissionBlock};
use crate::domain::types::AdmissionBlockId;
use crate::models::admission_block::{
    AdmissionBlock as DbAdmissionBlock, NewAdmissionBlock as DbNewAdmissionBlock,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AdmissionBlockReader, AdmissionBlockWriter, DieselRepository};

impl AdmissionBlockReader for DieselRepository {
    fn list_admission_blocks(&self) -> RepositoryResult<Vec<AdmissionBlock>> {
        use crate::schema::admission_blocks;

        let mut conn = self.conn()?;
        admission_blocks::table
            .order(admission_blocks::code.asc())
            .load::<DbAdmissionBlock>(&mut conn)?
            .into_iter()
            .map(|row| AdmissionBlock::try_from(row).map_err(RepositoryError::from))
            .collect()
    }

    fn get_admission_block_by_id(
        &self,
        id: AdmissionBlockId,
    ) -> RepositoryResult<Option<AdmissionBlock>> {
        use crate::schema::admission_blocks;

        let mut conn = self.conn()?;
        let row = admission_blocks::table
            .find(id.get())
            .first::<DbAdmissionBlock>(&mut conn)
            .optional()?;

        row.map(|row| AdmissionBlock::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }
}

impl AdmissionBlockWriter for DieselRepository {
    fn create_admission_block(&self, block: &NewAdmissionBlock) -> RepositoryResult<AdmissionBlock> {
        use crate::schema::admission_blocks;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(admission_blocks::table)
            .values(DbNewAdmissionBlock::from(block))
            .get_result::<DbAdmissionBlock>(&mut conn)?;

        Ok(AdmissionBlock::try_from(row)?)
    }

    fn update_admission_block(
        &self,
        id: AdmissionBlockId,
        block: &NewAdmissionBlock,
    ) -> RepositoryResult<AdmissionBlock> {
        use crate::schema::admission_blocks;

        let mut conn = self.conn()?;
        let row = diesel::update(admission_blocks::table.find(id.get()))
            .set(DbNewAdmissionBlock::from(block))
            .get_result::<DbAdmissionBlock>(&mut conn)?;

        Ok(AdmissionBlock::try_from(row)?)
    }

    fn delete_admission_block(&self, id: AdmissionBlockId) -> RepositoryResult<()> {
        use crate::schema::admission_blocks;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(admission_blocks::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
