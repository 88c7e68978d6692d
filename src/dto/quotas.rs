//! DTOs used by the quota screen.

use serde::Serialize;

use crate::domain::admission_block::AdmissionBlock;
use crate::domain::admission_year::AdmissionYear;
use crate::domain::major::Major;
use crate::domain::quota::{Quota, QuotaView};
use crate::dto::ListPageData;

/// Quota list plus the catalog entries offered by the add form.
#[derive(Debug, Serialize)]
pub struct QuotasPageData {
    pub page: ListPageData<QuotaView>,
    pub majors: Vec<Major>,
    pub blocks: Vec<AdmissionBlock>,
    pub years: Vec<AdmissionYear>,
}

/// Quota being edited plus the catalog entries of the edit form.
#[derive(Debug, Serialize)]
pub struct QuotaModalData {
    pub quota: Quota,
    pub majors: Vec<Major>,
    pub blocks: Vec<AdmissionBlock>,
    pub years: Vec<AdmissionYear>,
}
