//! Data service: one reader/writer trait pair per resource.
//!
//! Services only ever depend on these traits. Mutations never patch any
//! cached state; callers list the resource again after writing.

use crate::db::{DbConnection, DbPool};
use crate::domain::admission_block::{AdmissionBlock, NewAdmissionBlock};
use crate::domain::admission_year::{AdmissionYear, NewAdmissionYear};
use crate::domain::applicant::{
    ApplicantProfile, LearningRecord, NewApplicantProfile, NewLearningRecord, NewTranscriptScore,
    TranscriptScore,
};
use crate::domain::criterion::{Criterion, NewCriterion};
use crate::domain::major::{Major, NewMajor};
use crate::domain::quota::{NewQuota, Quota, QuotaView};
use crate::domain::region::{NewRegion, Region};
use crate::domain::types::{
    AdmissionBlockId, AdmissionYearId, ApplicantId, CriterionId, Grade, LearningRecordId,
    MajorId, QuotaId, RegionId, Semester,
};
use crate::repository::errors::RepositoryResult;

pub mod admission_block;
pub mod admission_year;
pub mod applicant;
pub mod criterion;
pub mod errors;
pub mod major;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod quota;
pub mod region;

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

pub trait AdmissionBlockReader {
    fn list_admission_blocks(&self) -> RepositoryResult<Vec<AdmissionBlock>>;
    fn get_admission_block_by_id(
        &self,
        id: AdmissionBlockId,
    ) -> RepositoryResult<Option<AdmissionBlock>>;
}

pub trait AdmissionBlockWriter {
    fn create_admission_block(&self, block: &NewAdmissionBlock) -> RepositoryResult<AdmissionBlock>;
    fn update_admission_block(
        &self,
        id: AdmissionBlockId,
        block: &NewAdmissionBlock,
    ) -> RepositoryResult<AdmissionBlock>;
    fn delete_admission_block(&self, id: AdmissionBlockId) -> RepositoryResult<()>;
}

pub trait MajorReader {
    fn list_majors(&self) -> RepositoryResult<Vec<Major>>;
    fn get_major_by_id(&self, id: MajorId) -> RepositoryResult<Option<Major>>;
}

pub trait MajorWriter {
    fn create_major(&self, major: &NewMajor) -> RepositoryResult<Major>;
    /// Inserts a batch in one transaction, replacing majors that share a code.
    fn upsert_majors(&self, majors: &[NewMajor]) -> RepositoryResult<usize>;
    fn update_major(&self, id: MajorId, major: &NewMajor) -> RepositoryResult<Major>;
    fn delete_major(&self, id: MajorId) -> RepositoryResult<()>;
}

pub trait RegionReader {
    fn list_regions(&self) -> RepositoryResult<Vec<Region>>;
    fn get_region_by_id(&self, id: RegionId) -> RepositoryResult<Option<Region>>;
}

pub trait RegionWriter {
    fn create_region(&self, region: &NewRegion) -> RepositoryResult<Region>;
    fn update_region(&self, id: RegionId, region: &NewRegion) -> RepositoryResult<Region>;
    fn delete_region(&self, id: RegionId) -> RepositoryResult<()>;
}

pub trait AdmissionYearReader {
    /// Newest year first.
    fn list_admission_years(&self) -> RepositoryResult<Vec<AdmissionYear>>;
    fn get_admission_year_by_id(
        &self,
        id: AdmissionYearId,
    ) -> RepositoryResult<Option<AdmissionYear>>;
}

pub trait AdmissionYearWriter {
    fn create_admission_year(&self, year: &NewAdmissionYear) -> RepositoryResult<AdmissionYear>;
    /// Marks `id` as the only active year.
    fn activate_admission_year(&self, id: AdmissionYearId) -> RepositoryResult<AdmissionYear>;
    fn delete_admission_year(&self, id: AdmissionYearId) -> RepositoryResult<()>;
}

pub trait CriterionReader {
    fn list_criteria(&self) -> RepositoryResult<Vec<Criterion>>;
    fn get_criterion_by_id(&self, id: CriterionId) -> RepositoryResult<Option<Criterion>>;
}

pub trait CriterionWriter {
    fn create_criterion(&self, criterion: &NewCriterion) -> RepositoryResult<Criterion>;
    fn update_criterion(
        &self,
        id: CriterionId,
        criterion: &NewCriterion,
    ) -> RepositoryResult<Criterion>;
    fn delete_criterion(&self, id: CriterionId) -> RepositoryResult<()>;
}

pub trait QuotaReader {
    fn list_quotas(&self) -> RepositoryResult<Vec<QuotaView>>;
    fn get_quota_by_id(&self, id: QuotaId) -> RepositoryResult<Option<Quota>>;
}

pub trait QuotaWriter {
    fn create_quota(&self, quota: &NewQuota) -> RepositoryResult<Quota>;
    fn update_quota(&self, id: QuotaId, quota: &NewQuota) -> RepositoryResult<Quota>;
    fn delete_quota(&self, id: QuotaId) -> RepositoryResult<()>;
}

pub trait ApplicantReader {
    fn list_applicants(&self) -> RepositoryResult<Vec<ApplicantProfile>>;
    fn get_applicant_by_id(&self, id: ApplicantId) -> RepositoryResult<Option<ApplicantProfile>>;
    fn get_applicant_by_user(&self, user_sub: &str) -> RepositoryResult<Option<ApplicantProfile>>;
    fn list_learning_records(&self, applicant_id: ApplicantId)
    -> RepositoryResult<Vec<LearningRecord>>;
    fn list_transcript_scores(
        &self,
        applicant_id: ApplicantId,
    ) -> RepositoryResult<Vec<TranscriptScore>>;
}

pub trait ApplicantWriter {
    /// Creates the profile for `user_sub` or overwrites the existing one.
    fn save_applicant(&self, profile: &NewApplicantProfile) -> RepositoryResult<ApplicantProfile>;
    fn set_applicant_photo(&self, id: ApplicantId, photo_path: &str) -> RepositoryResult<()>;
    fn create_learning_record(&self, record: &NewLearningRecord)
    -> RepositoryResult<LearningRecord>;
    /// Deletes a row only when it belongs to `applicant_id`; returns the number removed.
    fn delete_learning_record(
        &self,
        applicant_id: ApplicantId,
        id: LearningRecordId,
    ) -> RepositoryResult<usize>;
    /// Replaces every score of one grade and semester.
    fn replace_transcript_scores(
        &self,
        applicant_id: ApplicantId,
        grade: Grade,
        semester: Semester,
        scores: &[NewTranscriptScore],
    ) -> RepositoryResult<usize>;
}
