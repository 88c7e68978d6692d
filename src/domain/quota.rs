use serde::Serialize;

use crate::domain::types::{AdmissionBlockId, AdmissionYearId, MajorId, QuotaAmount, QuotaId};
use crate::pagination::FieldSelector;

/// Number of seats offered for a major through one admission block in one year.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Quota {
    pub id: QuotaId,
    pub major_id: MajorId,
    pub admission_block_id: AdmissionBlockId,
    pub admission_year_id: AdmissionYearId,
    pub amount: QuotaAmount,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewQuota {
    pub major_id: MajorId,
    pub admission_block_id: AdmissionBlockId,
    pub admission_year_id: AdmissionYearId,
    pub amount: QuotaAmount,
}

/// Quota joined with the labels shown in the quota table.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct QuotaView {
    pub quota: Quota,
    pub major_code: String,
    pub major_name: String,
    pub block_code: String,
    pub year: String,
}

impl QuotaView {
    pub const SEARCH_FIELDS: &'static [FieldSelector<Self>] = &[
        |view| Some(view.major_code.as_str()),
        |view| Some(view.major_name.as_str()),
        |view| Some(view.block_code.as_str()),
        |view| Some(view.year.as_str()),
    ];
}
