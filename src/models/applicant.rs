//! Diesel models representing applicant profiles, learning history and transcripts.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::applicant::{
    ApplicantProfile as DomainApplicantProfile, LearningRecord as DomainLearningRecord,
    NewApplicantProfile as DomainNewApplicantProfile,
    NewLearningRecord as DomainNewLearningRecord,
    NewTranscriptScore as DomainNewTranscriptScore, TranscriptScore as DomainTranscriptScore,
};
use crate::domain::types::{
    ApplicantId, ContactEmail, DisplayName, Gender, Grade, LearningRecordId, NationalId,
    PhoneNumber, RegionId, SchoolName, SchoolYear, Score, Semester, SubjectName,
    TranscriptScoreId, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::applicants)]
pub struct Applicant {
    pub id: i32,
    pub user_sub: String,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub national_id: String,
    pub phone: String,
    pub email: String,
    pub address: Option<String>,
    pub region_id: Option<i32>,
    pub photo_path: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::applicants)]
pub struct NewApplicant<'a> {
    pub user_sub: &'a str,
    pub full_name: &'a str,
    pub date_of_birth: NaiveDate,
    pub gender: &'a str,
    pub national_id: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub address: Option<&'a str>,
    pub region_id: Option<i32>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::applicants)]
#[diesel(treat_none_as_null = true)]
/// Data used when an applicant edits an existing profile.
pub struct UpdateApplicant<'a> {
    pub full_name: &'a str,
    pub date_of_birth: NaiveDate,
    pub gender: &'a str,
    pub national_id: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub address: Option<&'a str>,
    pub region_id: Option<i32>,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Applicant, foreign_key = applicant_id))]
#[diesel(table_name = crate::schema::learning_records)]
pub struct LearningRecord {
    pub id: i32,
    pub applicant_id: i32,
    pub grade: i32,
    pub school_year: String,
    pub school_name: String,
    pub province: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::learning_records)]
pub struct NewLearningRecord<'a> {
    pub applicant_id: i32,
    pub grade: i32,
    pub school_year: &'a str,
    pub school_name: &'a str,
    pub province: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Applicant, foreign_key = applicant_id))]
#[diesel(table_name = crate::schema::transcript_scores)]
pub struct TranscriptScore {
    pub id: i32,
    pub applicant_id: i32,
    pub grade: i32,
    pub semester: i32,
    pub subject: String,
    pub score: f64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::transcript_scores)]
pub struct NewTranscriptScore<'a> {
    pub applicant_id: i32,
    pub grade: i32,
    pub semester: i32,
    pub subject: &'a str,
    pub score: f64,
}

impl TryFrom<Applicant> for DomainApplicantProfile {
    type Error = TypeConstraintError;

    fn try_from(applicant: Applicant) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ApplicantId::new(applicant.id)?,
            user_sub: applicant.user_sub,
            full_name: DisplayName::new(applicant.full_name)?,
            date_of_birth: applicant.date_of_birth,
            gender: applicant.gender.parse::<Gender>()?,
            national_id: NationalId::new(applicant.national_id)?,
            phone: PhoneNumber::new(applicant.phone)?,
            email: ContactEmail::new(applicant.email)?,
            address: applicant.address,
            region_id: applicant.region_id.map(RegionId::new).transpose()?,
            photo_path: applicant.photo_path,
            created_at: applicant.created_at,
            updated_at: applicant.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewApplicantProfile> for NewApplicant<'a> {
    fn from(profile: &'a DomainNewApplicantProfile) -> Self {
        Self {
            user_sub: profile.user_sub.as_str(),
            full_name: profile.full_name.as_str(),
            date_of_birth: profile.date_of_birth,
            gender: profile.gender.as_str(),
            national_id: profile.national_id.as_str(),
            phone: profile.phone.as_str(),
            email: profile.email.as_str(),
            address: profile.address.as_deref(),
            region_id: profile.region_id.map(RegionId::get),
        }
    }
}

impl<'a> UpdateApplicant<'a> {
    pub fn new(profile: &'a DomainNewApplicantProfile, updated_at: NaiveDateTime) -> Self {
        Self {
            full_name: profile.full_name.as_str(),
            date_of_birth: profile.date_of_birth,
            gender: profile.gender.as_str(),
            national_id: profile.national_id.as_str(),
            phone: profile.phone.as_str(),
            email: profile.email.as_str(),
            address: profile.address.as_deref(),
            region_id: profile.region_id.map(RegionId::get),
            updated_at,
        }
    }
}

impl TryFrom<LearningRecord> for DomainLearningRecord {
    type Error = TypeConstraintError;

    fn try_from(record: LearningRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LearningRecordId::new(record.id)?,
            applicant_id: ApplicantId::new(record.applicant_id)?,
            grade: Grade::new(record.grade)?,
            school_year: SchoolYear::new(record.school_year)?,
            school_name: SchoolName::new(record.school_name)?,
            province: DisplayName::new(record.province)?,
        })
    }
}

impl<'a> From<&'a DomainNewLearningRecord> for NewLearningRecord<'a> {
    fn from(record: &'a DomainNewLearningRecord) -> Self {
        Self {
            applicant_id: record.applicant_id.get(),
            grade: record.grade.get(),
            school_year: record.school_year.as_str(),
            school_name: record.school_name.as_str(),
            province: record.province.as_str(),
        }
    }
}

impl TryFrom<TranscriptScore> for DomainTranscriptScore {
    type Error = TypeConstraintError;

    fn try_from(score: TranscriptScore) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TranscriptScoreId::new(score.id)?,
            applicant_id: ApplicantId::new(score.applicant_id)?,
            grade: Grade::new(score.grade)?,
            semester: Semester::new(score.semester)?,
            subject: SubjectName::new(score.subject)?,
            score: Score::new(score.score)?,
        })
    }
}

impl<'a> From<&'a DomainNewTranscriptScore> for NewTranscriptScore<'a> {
    fn from(score: &'a DomainNewTranscriptScore) -> Self {
        Self {
            applicant_id: score.applicant_id.get(),
            grade: score.grade.get(),
            semester: score.semester.get(),
            subject: score.subject.as_str(),
            score: score.score.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Applicant {
        let created = NaiveDate::from_ymd_opt(2025, 3, 1)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .expect("valid timestamp");
        Applicant {
            id: 1,
            user_sub: "42".into(),
            full_name: "Nguyễn Văn An".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2007, 5, 20).expect("valid date"),
            gender: "male".into(),
            national_id: "001207004321".into(),
            phone: "+84912345678".into(),
            email: "an@example.com".into(),
            address: None,
            region_id: Some(2),
            photo_path: None,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn from_row_into_domain() {
        let profile = DomainApplicantProfile::try_from(row()).expect("valid profile");

        assert_eq!(profile.gender, Gender::Male);
        assert_eq!(profile.region_id.map(RegionId::get), Some(2));
        assert_eq!(profile.national_id.as_str(), "001207004321");
    }

    #[test]
    fn unknown_gender_is_rejected() {
        let mut invalid = row();
        invalid.gender = "n/a".into();

        assert!(DomainApplicantProfile::try_from(invalid).is_err());
    }
}
