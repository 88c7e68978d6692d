//! Diesel models representing admission criteria.

use diesel::prelude::*;

use crate::domain::criterion::{Criterion as DomainCriterion, NewCriterion as DomainNewCriterion};
use crate::domain::types::{CatalogCode, CriterionId, DisplayName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::criteria)]
pub struct Criterion {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::criteria)]
#[diesel(treat_none_as_null = true)]
pub struct NewCriterion<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl TryFrom<Criterion> for DomainCriterion {
    type Error = TypeConstraintError;

    fn try_from(criterion: Criterion) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CriterionId::new(criterion.id)?,
            code: CatalogCode::new(criterion.code)?,
            name: DisplayName::new(criterion.name)?,
            description: criterion.description,
        })
    }
}

impl<'a> From<&'a DomainNewCriterion> for NewCriterion<'a> {
    fn from(criterion: &'a DomainNewCriterion) -> Self {
        Self {
            code: criterion.code.as_str(),
            name: criterion.name.as_str(),
            description: criterion.description.as_deref(),
        }
    }
}
