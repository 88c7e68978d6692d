use serde::Serialize;

use crate::domain::types::{CatalogCode, CriterionId, DisplayName};
use crate::pagination::FieldSelector;

/// Admission method such as transcript review or national exam scores.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Criterion {
    pub id: CriterionId,
    pub code: CatalogCode,
    pub name: DisplayName,
    pub description: Option<String>,
}

impl Criterion {
    pub const SEARCH_FIELDS: &'static [FieldSelector<Self>] = &[
        |criterion| Some(criterion.code.as_str()),
        |criterion| Some(criterion.name.as_str()),
        |criterion| criterion.description.as_deref(),
    ];
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewCriterion {
    pub code: CatalogCode,
    pub name: DisplayName,
    pub description: Option<String>,
}

impl NewCriterion {
    pub fn new(code: CatalogCode, name: DisplayName, description: Option<String>) -> Self {
        Self {
            code,
            name,
            description: description
                .map(|d| ammonia::clean(d.trim()))
                .filter(|d| !d.is_empty()),
        }
    }
}
