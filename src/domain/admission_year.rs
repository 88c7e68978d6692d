use serde::Serialize;

use crate::domain::types::{AdmissionYearId, YearNumber};
use crate::pagination::FieldSelector;

/// Enrolment season. At most one year is active at a time.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AdmissionYear {
    pub id: AdmissionYearId,
    pub year: YearNumber,
    pub is_active: bool,
    /// `year` as text so it can take part in searches.
    pub label: String,
}

impl AdmissionYear {
    pub fn new(id: AdmissionYearId, year: YearNumber, is_active: bool) -> Self {
        Self {
            id,
            year,
            is_active,
            label: year.to_string(),
        }
    }

    pub const SEARCH_FIELDS: &'static [FieldSelector<Self>] = &[|year| Some(year.label.as_str())];
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewAdmissionYear {
    pub year: YearNumber,
}
