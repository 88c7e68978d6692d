use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::types::{
    ApplicantId, ContactEmail, DisplayName, Gender, Grade, LearningRecordId, NationalId,
    PhoneNumber, RegionId, SchoolName, SchoolYear, Score, Semester, SubjectName,
    TranscriptScoreId,
};
use crate::pagination::FieldSelector;

/// Personal information an applicant keeps on file.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ApplicantProfile {
    pub id: ApplicantId,
    /// Subject claim of the identity token that owns the profile.
    pub user_sub: String,
    pub full_name: DisplayName,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub national_id: NationalId,
    pub phone: PhoneNumber,
    pub email: ContactEmail,
    pub address: Option<String>,
    pub region_id: Option<RegionId>,
    /// File name of the uploaded ID photo inside the upload directory.
    pub photo_path: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ApplicantProfile {
    pub const SEARCH_FIELDS: &'static [FieldSelector<Self>] = &[
        |profile| Some(profile.full_name.as_str()),
        |profile| Some(profile.national_id.as_str()),
        |profile| Some(profile.email.as_str()),
    ];
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewApplicantProfile {
    pub user_sub: String,
    pub full_name: DisplayName,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub national_id: NationalId,
    pub phone: PhoneNumber,
    pub email: ContactEmail,
    pub address: Option<String>,
    pub region_id: Option<RegionId>,
}

/// One school year of the applicant's high-school history.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct LearningRecord {
    pub id: LearningRecordId,
    pub applicant_id: ApplicantId,
    pub grade: Grade,
    pub school_year: SchoolYear,
    pub school_name: SchoolName,
    pub province: DisplayName,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewLearningRecord {
    pub applicant_id: ApplicantId,
    pub grade: Grade,
    pub school_year: SchoolYear,
    pub school_name: SchoolName,
    pub province: DisplayName,
}

/// Average score of one subject in one semester.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TranscriptScore {
    pub id: TranscriptScoreId,
    pub applicant_id: ApplicantId,
    pub grade: Grade,
    pub semester: Semester,
    pub subject: SubjectName,
    pub score: Score,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewTranscriptScore {
    pub applicant_id: ApplicantId,
    pub grade: Grade,
    pub semester: Semester,
    pub subject: SubjectName,
    pub score: Score,
}
