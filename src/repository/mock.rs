//! Mock repository implementations for isolating services in tests.

use mockall::mock;

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
use crate::repository::{
    AdmissionBlockReader, AdmissionBlockWriter, AdmissionYearReader, AdmissionYearWriter,
    ApplicantReader, ApplicantWriter, CriterionReader, CriterionWriter, MajorReader, MajorWriter,
    QuotaReader, QuotaWriter, RegionReader, RegionWriter,
};

mock! {
    pub Repository {}

    impl AdmissionBlockReader for Repository {
        fn list_admission_blocks(&self) -> RepositoryResult<Vec<AdmissionBlock>>;
        fn get_admission_block_by_id(
            &self,
            id: AdmissionBlockId,
        ) -> RepositoryResult<Option<AdmissionBlock>>;
    }

    impl AdmissionBlockWriter for Repository {
        fn create_admission_block(&self, block: &NewAdmissionBlock) -> RepositoryResult<AdmissionBlock>;
        fn update_admission_block(
            &self,
            id: AdmissionBlockId,
            block: &NewAdmissionBlock,
        ) -> RepositoryResult<AdmissionBlock>;
        fn delete_admission_block(&self, id: AdmissionBlockId) -> RepositoryResult<()>;
    }

    impl MajorReader for Repository {
        fn list_majors(&self) -> RepositoryResult<Vec<Major>>;
        fn get_major_by_id(&self, id: MajorId) -> RepositoryResult<Option<Major>>;
    }

    impl MajorWriter for Repository {
        fn create_major(&self, major: &NewMajor) -> RepositoryResult<Major>;
        fn upsert_majors(&self, majors: &[NewMajor]) -> RepositoryResult<usize>;
        fn update_major(&self, id: MajorId, major: &NewMajor) -> RepositoryResult<Major>;
        fn delete_major(&self, id: MajorId) -> RepositoryResult<()>;
    }

    impl RegionReader for Repository {
        fn list_regions(&self) -> RepositoryResult<Vec<Region>>;
        fn get_region_by_id(&self, id: RegionId) -> RepositoryResult<Option<Region>>;
    }

    impl RegionWriter for Repository {
        fn create_region(&self, region: &NewRegion) -> RepositoryResult<Region>;
        fn update_region(&self, id: RegionId, region: &NewRegion) -> RepositoryResult<Region>;
        fn delete_region(&self, id: RegionId) -> RepositoryResult<()>;
    }

    impl AdmissionYearReader for Repository {
        fn list_admission_years(&self) -> RepositoryResult<Vec<AdmissionYear>>;
        fn get_admission_year_by_id(
            &self,
            id: AdmissionYearId,
        ) -> RepositoryResult<Option<AdmissionYear>>;
    }

    impl AdmissionYearWriter for Repository {
        fn create_admission_year(&self, year: &NewAdmissionYear) -> RepositoryResult<AdmissionYear>;
        fn activate_admission_year(&self, id: AdmissionYearId) -> RepositoryResult<AdmissionYear>;
        fn delete_admission_year(&self, id: AdmissionYearId) -> RepositoryResult<()>;
    }

    impl CriterionReader for Repository {
        fn list_criteria(&self) -> RepositoryResult<Vec<Criterion>>;
        fn get_criterion_by_id(&self, id: CriterionId) -> RepositoryResult<Option<Criterion>>;
    }

    impl CriterionWriter for Repository {
        fn create_criterion(&self, criterion: &NewCriterion) -> RepositoryResult<Criterion>;
        fn update_criterion(
            &self,
            id: CriterionId,
            criterion: &NewCriterion,
        ) -> RepositoryResult<Criterion>;
        fn delete_criterion(&self, id: CriterionId) -> RepositoryResult<()>;
    }

    impl QuotaReader for Repository {
        fn list_quotas(&self) -> RepositoryResult<Vec<QuotaView>>;
        fn get_quota_by_id(&self, id: QuotaId) -> RepositoryResult<Option<Quota>>;
    }

    impl QuotaWriter for Repository {
        fn create_quota(&self, quota: &NewQuota) -> RepositoryResult<Quota>;
        fn update_quota(&self, id: QuotaId, quota: &NewQuota) -> RepositoryResult<Quota>;
        fn delete_quota(&self, id: QuotaId) -> RepositoryResult<()>;
    }

    impl ApplicantReader for Repository {
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

    impl ApplicantWriter for Repository {
        fn save_applicant(&self, profile: &NewApplicantProfile) -> RepositoryResult<ApplicantProfile>;
        fn set_applicant_photo(&self, id: ApplicantId, photo_path: &str) -> RepositoryResult<()>;
        fn create_learning_record(&self, record: &NewLearningRecord)
        -> RepositoryResult<LearningRecord>;
        fn delete_learning_record(
            &self,
            applicant_id: ApplicantId,
            id: LearningRecordId,
        ) -> RepositoryResult<usize>;
        fn replace_transcript_scores(
            &self,
            applicant_id: ApplicantId,
            grade: Grade,
            semester: Semester,
            scores: &[NewTranscriptScore],
        ) -> RepositoryResult<usize>;
    }
}
