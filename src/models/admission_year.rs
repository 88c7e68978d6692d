//! Diesel models representing admission years.

use diesel::prelude::*;

use crate::domain::admission_year::{
    AdmissionYear as DomainAdmissionYear, NewAdmissionYear as DomainNewAdmissionYear,
};
use crate::domain::types::{AdmissionYearId, TypeConstraintError, YearNumber};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::admission_years)]
pub struct AdmissionYear {
    pub id: i32,
    pub year: i32,
    pub is_active: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::admission_years)]
pub struct NewAdmissionYear {
    pub year: i32,
    pub is_active: bool,
}

impl TryFrom<AdmissionYear> for DomainAdmissionYear {
    type Error = TypeConstraintError;

    fn try_from(year: AdmissionYear) -> Result<Self, Self::Error> {
        Ok(Self::new(
            AdmissionYearId::new(year.id)?,
            YearNumber::new(year.year)?,
            year.is_active,
        ))
    }
}

impl From<&DomainNewAdmissionYear> for NewAdmissionYear {
    fn from(year: &DomainNewAdmissionYear) -> Self {
        Self {
            year: year.year.get(),
            is_active: false,
        }
    }
}
