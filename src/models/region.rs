//! Diesel models representing priority regions.

use diesel::prelude::*;

use crate::domain::region::{NewRegion as DomainNewRegion, Region as DomainRegion};
use crate::domain::types::{BonusPoints, CatalogCode, DisplayName, RegionId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::regions)]
pub struct Region {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub bonus_points: f64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::regions)]
pub struct NewRegion<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub bonus_points: f64,
}

impl TryFrom<Region> for DomainRegion {
    type Error = TypeConstraintError;

    fn try_from(region: Region) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RegionId::new(region.id)?,
            code: CatalogCode::new(region.code)?,
            name: DisplayName::new(region.name)?,
            bonus_points: BonusPoints::new(region.bonus_points)?,
        })
    }
}

impl<'a> From<&'a DomainNewRegion> for NewRegion<'a> {
    fn from(region: &'a DomainNewRegion) -> Self {
        Self {
            code: region.code.as_str(),
            name: region.name.as_str(),
            bonus_points: region.bonus_points.get(),
        }
    }
}
