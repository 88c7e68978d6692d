//! Diesel models representing majors.

use diesel::prelude::*;

use crate::domain::major::{Major as DomainMajor, NewMajor as DomainNewMajor};
use crate::domain::types::{CatalogCode, DisplayName, MajorId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::majors)]
pub struct Major {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::majors)]
#[diesel(treat_none_as_null = true)]
pub struct NewMajor<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl TryFrom<Major> for DomainMajor {
    type Error = TypeConstraintError;

    fn try_from(major: Major) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MajorId::new(major.id)?,
            code: CatalogCode::new(major.code)?,
            name: DisplayName::new(major.name)?,
            description: major.description,
        })
    }
}

impl<'a> From<&'a DomainNewMajor> for NewMajor<'a> {
    fn from(major: &'a DomainNewMajor) -> Self {
        Self {
            code: major.code.as_str(),
            name: major.name.as_str(),
            description: major.description.as_deref(),
        }
    }
}
