use serde::Serialize;

use crate::domain::types::{AdmissionBlockId, CatalogCode, DisplayName};
use crate::pagination::FieldSelector;

/// Subject combination applicants are examined on, e.g. `A00` (Math, Physics, Chemistry).
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AdmissionBlock {
    pub id: AdmissionBlockId,
    pub code: CatalogCode,
    pub name: DisplayName,
    pub subjects: DisplayName,
}

impl AdmissionBlock {
    pub const SEARCH_FIELDS: &'static [FieldSelector<Self>] = &[
        |block| Some(block.code.as_str()),
        |block| Some(block.name.as_str()),
        |block| Some(block.subjects.as_str()),
    ];
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewAdmissionBlock {
    pub code: CatalogCode,
    pub name: DisplayName,
    pub subjects: DisplayName,
}
