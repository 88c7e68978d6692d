//! Forms submitted by applicants from their profile page.

use std::collections::HashSet;
use std::io::{Read, Seek, SeekFrom};

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::domain::applicant::{NewApplicantProfile, NewLearningRecord, NewTranscriptScore};
use crate::domain::types::{
    ApplicantId, ContactEmail, DisplayName, Gender, Grade, NationalId, PhoneNumber, RegionId,
    SchoolName, SchoolYear, Score, Semester, SubjectName,
};
use crate::forms::{FormError, optional_text};

/// Largest accepted ID photo.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1, max = 128))]
    pub full_name: String,
    /// `YYYY-MM-DD`, as sent by a date input.
    pub date_of_birth: String,
    pub gender: String,
    pub national_id: String,
    pub phone: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub address: Option<String>,
    /// Blank when the applicant has not picked a region.
    #[serde(default)]
    pub region_id: Option<String>,
}

/// Validated personal information, not yet bound to an identity.
pub struct ProfilePayload {
    full_name: DisplayName,
    date_of_birth: NaiveDate,
    gender: Gender,
    national_id: NationalId,
    phone: PhoneNumber,
    email: ContactEmail,
    address: Option<String>,
    region_id: Option<RegionId>,
}

impl TryFrom<ProfileForm> for ProfilePayload {
    type Error = FormError;

    fn try_from(form: ProfileForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let date_of_birth = NaiveDate::parse_from_str(form.date_of_birth.trim(), "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate)?;
        if date_of_birth >= Utc::now().date_naive() {
            return Err(FormError::InvalidDate);
        }

        let region_id = optional_text(form.region_id)
            .map(|id| {
                id.parse::<i32>()
                    .ok()
                    .and_then(|id| RegionId::new(id).ok())
                    .ok_or(FormError::InvalidId)
            })
            .transpose()?;

        Ok(Self {
            full_name: DisplayName::new(form.full_name).map_err(|_| FormError::InvalidName)?,
            date_of_birth,
            gender: form
                .gender
                .parse::<Gender>()
                .map_err(|e| FormError::InvalidValue(e.to_string()))?,
            national_id: NationalId::new(form.national_id)
                .map_err(|_| FormError::InvalidNationalId)?,
            phone: PhoneNumber::new(form.phone).map_err(|_| FormError::InvalidPhoneNumber)?,
            email: ContactEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            address: optional_text(form.address).map(|a| ammonia::clean(&a)),
            region_id,
        })
    }
}

impl ProfilePayload {
    pub fn into_domain(self, user_sub: &str) -> NewApplicantProfile {
        NewApplicantProfile {
            user_sub: user_sub.to_string(),
            full_name: self.full_name,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            national_id: self.national_id,
            phone: self.phone,
            email: self.email,
            address: self.address,
            region_id: self.region_id,
        }
    }
}

/// One school year of the learning history.
#[derive(Debug, Deserialize, Validate)]
pub struct LearningRecordForm {
    pub grade: i32,
    pub school_year: String,
    #[validate(length(min = 1, max = 256))]
    pub school_name: String,
    #[validate(length(min = 1, max = 128))]
    pub province: String,
}

pub struct LearningRecordPayload {
    grade: Grade,
    school_year: SchoolYear,
    school_name: SchoolName,
    province: DisplayName,
}

impl TryFrom<LearningRecordForm> for LearningRecordPayload {
    type Error = FormError;

    fn try_from(form: LearningRecordForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            grade: Grade::new(form.grade).map_err(|e| FormError::InvalidValue(e.to_string()))?,
            school_year: SchoolYear::new(form.school_year)
                .map_err(|e| FormError::InvalidValue(e.to_string()))?,
            school_name: SchoolName::new(form.school_name).map_err(|_| FormError::InvalidName)?,
            province: DisplayName::new(form.province).map_err(|_| FormError::InvalidName)?,
        })
    }
}

impl LearningRecordPayload {
    pub fn into_domain(self, applicant_id: ApplicantId) -> NewLearningRecord {
        NewLearningRecord {
            applicant_id,
            grade: self.grade,
            school_year: self.school_year,
            school_name: self.school_name,
            province: self.province,
        }
    }
}

/// Scores of one grade and semester, entered as parallel `subject`/`score` rows.
#[derive(Debug, Deserialize)]
pub struct TranscriptForm {
    pub grade: i32,
    pub semester: i32,
    #[serde(default)]
    pub subject: Vec<String>,
    #[serde(default)]
    pub score: Vec<String>,
}

impl TranscriptForm {
    /// Decodes a urlencoded body with repeated keys.
    pub fn from_bytes(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|e| FormError::InvalidValue(e.to_string()))
    }
}

pub struct TranscriptPayload {
    pub grade: Grade,
    pub semester: Semester,
    pub scores: Vec<(SubjectName, Score)>,
}

impl TryFrom<TranscriptForm> for TranscriptPayload {
    type Error = FormError;

    fn try_from(form: TranscriptForm) -> Result<Self, Self::Error> {
        let grade = Grade::new(form.grade).map_err(|e| FormError::InvalidValue(e.to_string()))?;
        let semester =
            Semester::new(form.semester).map_err(|e| FormError::InvalidValue(e.to_string()))?;

        if form.subject.len() != form.score.len() {
            return Err(FormError::InvalidValue(
                "subjects and scores do not line up".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut scores = Vec::new();
        for (subject, score) in form.subject.iter().zip(form.score.iter()) {
            let (subject, score) = (subject.trim(), score.trim());
            if subject.is_empty() && score.is_empty() {
                continue;
            }

            let subject = SubjectName::new(subject).map_err(|_| FormError::InvalidName)?;
            if !seen.insert(subject.as_str().to_lowercase()) {
                return Err(FormError::InvalidValue(format!(
                    "duplicate subject `{subject}`"
                )));
            }

            let value = score
                .replace(',', ".")
                .parse::<f64>()
                .map_err(|_| FormError::InvalidValue(format!("score `{score}`")))?;
            let score = Score::new(value).map_err(|e| FormError::InvalidValue(e.to_string()))?;

            scores.push((subject, score));
        }

        Ok(Self {
            grade,
            semester,
            scores,
        })
    }
}

impl TranscriptPayload {
    pub fn into_domain(self, applicant_id: ApplicantId) -> Vec<NewTranscriptScore> {
        self.scores
            .into_iter()
            .map(|(subject, score)| NewTranscriptScore {
                applicant_id,
                grade: self.grade,
                semester: self.semester,
                subject,
                score,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoFormat {
    Jpeg,
    Png,
}

impl PhotoFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            PhotoFormat::Jpeg => "jpg",
            PhotoFormat::Png => "png",
        }
    }
}

/// Recognises JPEG and PNG files by their leading bytes.
pub fn detect_photo_format(header: &[u8]) -> Option<PhotoFormat> {
    const PNG: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    if header.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(PhotoFormat::Jpeg)
    } else if header.starts_with(&PNG) {
        Some(PhotoFormat::Png)
    } else {
        None
    }
}

#[derive(MultipartForm)]
pub struct UploadPhotoForm {
    #[multipart(limit = "5MB")]
    pub photo: TempFile,
}

impl UploadPhotoForm {
    /// Checks size and file signature of the uploaded photo.
    pub fn format(&mut self) -> Result<PhotoFormat, FormError> {
        if self.photo.size == 0 {
            return Err(FormError::InvalidFile("empty file".to_string()));
        }
        if self.photo.size > MAX_PHOTO_BYTES {
            return Err(FormError::InvalidFile("file is larger than 5 MB".to_string()));
        }

        let mut header = [0u8; 8];
        let file = self.photo.file.as_file_mut();
        let read = file
            .read(&mut header)
            .map_err(|e| FormError::InvalidFile(e.to_string()))?;
        file.seek(SeekFrom::Start(0))
            .map_err(|e| FormError::InvalidFile(e.to_string()))?;

        detect_photo_format(&header[..read])
            .ok_or_else(|| FormError::InvalidFile("only JPEG and PNG are accepted".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_form() -> ProfileForm {
        ProfileForm {
            full_name: "Trần Thị Bình".to_string(),
            date_of_birth: "2007-09-02".to_string(),
            gender: "female".to_string(),
            national_id: "079307001234".to_string(),
            phone: "0912 345 678".to_string(),
            email: "Binh@Example.com".to_string(),
            address: Some("  ".to_string()),
            region_id: Some(String::new()),
        }
    }

    #[test]
    fn profile_form_is_normalised() {
        let profile = ProfilePayload::try_from(profile_form())
            .unwrap()
            .into_domain("sub-1");

        assert_eq!(profile.user_sub, "sub-1");
        assert_eq!(profile.phone.as_str(), "+84912345678");
        assert_eq!(profile.email.as_str(), "binh@example.com");
        assert_eq!(profile.address, None);
        assert_eq!(profile.region_id, None);
        assert_eq!(profile.gender, Gender::Female);
    }

    #[test]
    fn future_birth_date_is_rejected() {
        let mut form = profile_form();
        form.date_of_birth = "2999-01-01".to_string();

        assert!(matches!(
            ProfilePayload::try_from(form),
            Err(FormError::InvalidDate)
        ));
    }

    #[test]
    fn short_national_id_is_rejected() {
        let mut form = profile_form();
        form.national_id = "12345".to_string();

        assert!(matches!(
            ProfilePayload::try_from(form),
            Err(FormError::InvalidNationalId)
        ));
    }

    #[test]
    fn learning_record_requires_consecutive_years() {
        let form = LearningRecordForm {
            grade: 10,
            school_year: "2021-2023".to_string(),
            school_name: "THPT Lê Hồng Phong".to_string(),
            province: "TP. Hồ Chí Minh".to_string(),
        };

        assert!(LearningRecordPayload::try_from(form).is_err());
    }

    #[test]
    fn transcript_form_decodes_repeated_fields() {
        let body = b"grade=11&semester=2&subject=To%C3%A1n&score=8,5&subject=&score=&subject=V%C4%83n&score=7";

        let form = TranscriptForm::from_bytes(body).unwrap();
        let payload = TranscriptPayload::try_from(form).unwrap();

        assert_eq!(payload.grade.get(), 11);
        assert_eq!(payload.semester.get(), 2);
        assert_eq!(payload.scores.len(), 2);
        assert_eq!(payload.scores[0].0.as_str(), "Toán");
        assert_eq!(payload.scores[0].1.get(), 8.5);
    }

    #[test]
    fn transcript_rejects_duplicate_subjects() {
        let form = TranscriptForm {
            grade: 10,
            semester: 1,
            subject: vec!["Toán".to_string(), "toán".to_string()],
            score: vec!["8".to_string(), "9".to_string()],
        };

        assert!(TranscriptPayload::try_from(form).is_err());
    }

    #[test]
    fn transcript_rejects_score_above_ten() {
        let form = TranscriptForm {
            grade: 12,
            semester: 1,
            subject: vec!["Lý".to_string()],
            score: vec!["10.5".to_string()],
        };

        assert!(TranscriptPayload::try_from(form).is_err());
    }

    #[test]
    fn photo_signatures_are_detected() {
        assert_eq!(
            detect_photo_format(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some(PhotoFormat::Jpeg)
        );
        assert_eq!(
            detect_photo_format(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
            Some(PhotoFormat::Png)
        );
        assert_eq!(detect_photo_format(b"GIF89a"), None);
    }
}
