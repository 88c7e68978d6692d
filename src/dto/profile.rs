//! DTOs used by the applicant profile pages.

use serde::Serialize;

use crate::domain::applicant::{ApplicantProfile, LearningRecord, TranscriptScore};
use crate::domain::region::Region;

/// Everything shown on the applicant's own profile page.
#[derive(Debug, Serialize)]
pub struct ProfilePageData {
    /// `None` until the applicant saves personal information for the first time.
    pub profile: Option<ApplicantProfile>,
    pub regions: Vec<Region>,
    pub learning_records: Vec<LearningRecord>,
    pub transcript_scores: Vec<TranscriptScore>,
}

/// Read-only view of one applicant for staff.
#[derive(Debug, Serialize)]
pub struct ApplicantDetailData {
    pub profile: ApplicantProfile,
    pub region: Option<Region>,
    pub learning_records: Vec<LearningRecord>,
    pub transcript_scores: Vec<TranscriptScore>,
}
