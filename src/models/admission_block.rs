//! Diesel models representing admission blocks.

use diesel::prelude::*;

use crate::domain::admission_block::{
    AdmissionBlock as DomainAdmissionBlock, NewAdmissionBlock as DomainNewAdmissionBlock,
};
use crate::domain::types::{AdmissionBlockId, CatalogCode, DisplayName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::admission_blocks)]
/// Diesel model for [`crate::domain::admission_block::AdmissionBlock`].
pub struct AdmissionBlock {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub subjects: String,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::admission_blocks)]
/// Insertable and update form of [`AdmissionBlock`].
pub struct NewAdmissionBlock<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub subjects: &'a str,
}

impl TryFrom<AdmissionBlock> for DomainAdmissionBlock {
    type Error = TypeConstraintError;

    fn try_from(block: AdmissionBlock) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AdmissionBlockId::new(block.id)?,
            code: CatalogCode::new(block.code)?,
            name: DisplayName::new(block.name)?,
            subjects: DisplayName::new(block.subjects)?,
        })
    }
}

impl<'a> From<&'a DomainNewAdmissionBlock> for NewAdmissionBlock<'a> {
    fn from(block: &'a DomainNewAdmissionBlock) -> Self {
        Self {
            code: block.code.as_str(),
            name: block.name.as_str(),
            subjects: block.subjects.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_row_into_domain() {
        let row = AdmissionBlock {
            id: 3,
            code: "a01".into(),
            name: "Khối A01".into(),
            subjects: "Toán, Lý, Anh".into(),
        };

        let block = DomainAdmissionBlock::try_from(row).expect("valid block");

        assert_eq!(block.id.get(), 3);
        assert_eq!(block.code.as_str(), "A01");
    }

    #[test]
    fn invalid_row_is_rejected() {
        let row = AdmissionBlock {
            id: 0,
            code: "A01".into(),
            name: "Khối A01".into(),
            subjects: "Toán".into(),
        };

        assert_eq!(
            DomainAdmissionBlock::try_from(row),
            Err(TypeConstraintError::NonPositiveId)
        );
    }
}
