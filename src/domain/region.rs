use serde::Serialize;

use crate::domain::types::{BonusPoints, CatalogCode, DisplayName, RegionId};
use crate::pagination::FieldSelector;

/// Priority region (khu vực ưu tiên) granting bonus points to its residents.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Region {
    pub id: RegionId,
    pub code: CatalogCode,
    pub name: DisplayName,
    pub bonus_points: BonusPoints,
}

impl Region {
    pub const SEARCH_FIELDS: &'static [FieldSelector<Self>] = &[
        |region| Some(region.code.as_str()),
        |region| Some(region.name.as_str()),
    ];
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewRegion {
    pub code: CatalogCode,
    pub name: DisplayName,
    pub bonus_points: BonusPoints,
}
