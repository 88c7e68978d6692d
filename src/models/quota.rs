//! Diesel models representing enrolment quotas.

use diesel::prelude::*;

use crate::domain::quota::{NewQuota as DomainNewQuota, Quota as DomainQuota};
use crate::domain::types::{
    AdmissionBlockId, AdmissionYearId, MajorId, QuotaAmount, QuotaId, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::quotas)]
pub struct Quota {
    pub id: i32,
    pub major_id: i32,
    pub admission_block_id: i32,
    pub admission_year_id: i32,
    pub amount: i32,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::quotas)]
pub struct NewQuota {
    pub major_id: i32,
    pub admission_block_id: i32,
    pub admission_year_id: i32,
    pub amount: i32,
}

impl TryFrom<Quota> for DomainQuota {
    type Error = TypeConstraintError;

    fn try_from(quota: Quota) -> Result<Self, Self::Error> {
        Ok(Self {
            id: QuotaId::new(quota.id)?,
            major_id: MajorId::new(quota.major_id)?,
            admission_block_id: AdmissionBlockId::new(quota.admission_block_id)?,
            admission_year_id: AdmissionYearId::new(quota.admission_year_id)?,
            amount: QuotaAmount::new(quota.amount)?,
        })
    }
}

impl From<&DomainNewQuota> for NewQuota {
    fn from(quota: &DomainNewQuota) -> Self {
        Self {
            major_id: quota.major_id.get(),
            admission_block_id: quota.admission_block_id.get(),
            admission_year_id: quota.admission_year_id.get(),
            amount: quota.amount.get(),
        }
    }
}
