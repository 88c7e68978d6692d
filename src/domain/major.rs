use serde::Serialize;

use crate::domain::types::{CatalogCode, DisplayName, MajorId};
use crate::pagination::FieldSelector;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Major {
    pub id: MajorId,
    pub code: CatalogCode,
    pub name: DisplayName,
    pub description: Option<String>,
}

impl Major {
    pub const SEARCH_FIELDS: &'static [FieldSelector<Self>] = &[
        |major| Some(major.code.as_str()),
        |major| Some(major.name.as_str()),
    ];
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewMajor {
    pub code: CatalogCode,
    pub name: DisplayName,
    pub description: Option<String>,
}

impl NewMajor {
    /// Builds a major, dropping a blank description.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_description_is_dropped() {
        let major = NewMajor::new(
            CatalogCode::new("7480201").unwrap(),
            DisplayName::new("Công nghệ thông tin").unwrap(),
            Some("   ".to_string()),
        );

        assert_eq!(major.description, None);
    }
}
