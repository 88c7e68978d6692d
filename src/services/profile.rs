//! Services behind the applicant's own profile page.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{APPLICANT_ROLE, SERVICE_ACCESS_ROLE};
use crate::domain::applicant::ApplicantProfile;
use crate::domain::types::{ApplicantId, LearningRecordId};
use crate::dto::profile::ProfilePageData;
use crate::forms::applicant::{
    LearningRecordForm, LearningRecordPayload, ProfileForm, ProfilePayload, TranscriptForm,
    TranscriptPayload, UploadPhotoForm,
};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ApplicantReader, ApplicantWriter, RegionReader};
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// Loads the profile owned by the signed-in applicant.
fn current_applicant<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<ApplicantProfile>
where
    R: ApplicantReader + ?Sized,
{
    repo.get_applicant_by_user(&user.sub)?.ok_or_else(|| {
        ServiceError::Form("Vui lòng lưu thông tin cá nhân trước.".to_string())
    })
}

pub fn load_profile<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<ProfilePageData>
where
    R: ApplicantReader + RegionReader + ?Sized,
{
    ensure_role(user, APPLICANT_ROLE)?;

    let profile = repo.get_applicant_by_user(&user.sub).map_err(|err| {
        log::error!("Failed to load applicant {}: {err}", user.sub);
        err
    })?;

    let (learning_records, transcript_scores) = match &profile {
        Some(profile) => (
            repo.list_learning_records(profile.id)?,
            repo.list_transcript_scores(profile.id)?,
        ),
        None => (Vec::new(), Vec::new()),
    };

    Ok(ProfilePageData {
        profile,
        regions: repo.list_regions()?,
        learning_records,
        transcript_scores,
    })
}

/// Creates the applicant's profile on first save and overwrites it afterwards.
pub fn save_profile<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ProfileForm,
) -> ServiceResult<ApplicantProfile>
where
    R: ApplicantWriter + RegionReader + ?Sized,
{
    ensure_role(user, APPLICANT_ROLE)?;

    let profile = ProfilePayload::try_from(form)?.into_domain(&user.sub);

    if let Some(region_id) = profile.region_id {
        if repo.get_region_by_id(region_id)?.is_none() {
            return Err(ServiceError::Form("Khu vực không tồn tại.".to_string()));
        }
    }

    repo.save_applicant(&profile).map_err(|err| {
        log::error!("Failed to save applicant {}: {err}", user.sub);
        err.into()
    })
}

pub fn add_learning_record<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: LearningRecordForm,
) -> ServiceResult<()>
where
    R: ApplicantReader + ApplicantWriter + ?Sized,
{
    ensure_role(user, APPLICANT_ROLE)?;

    let applicant = current_applicant(repo, user)?;
    let record = LearningRecordPayload::try_from(form)?.into_domain(applicant.id);

    repo.create_learning_record(&record).map_err(|err| {
        log::error!("Failed to add learning record for {}: {err}", applicant.id);
        err
    })?;

    Ok(())
}

/// Removes a learning history row, but only one owned by the caller.
pub fn delete_learning_record<R>(
    repo: &R,
    user: &AuthenticatedUser,
    record_id: i32,
) -> ServiceResult<()>
where
    R: ApplicantReader + ApplicantWriter + ?Sized,
{
    ensure_role(user, APPLICANT_ROLE)?;

    let applicant = current_applicant(repo, user)?;
    let record_id = LearningRecordId::new(record_id)?;

    match repo.delete_learning_record(applicant.id, record_id)? {
        0 => Err(ServiceError::NotFound),
        _ => Ok(()),
    }
}

/// Replaces the scores of the submitted grade and semester.
///
/// `body` is the raw urlencoded form because subjects and scores are
/// repeated keys.
pub fn save_transcript<R>(repo: &R, user: &AuthenticatedUser, body: &[u8]) -> ServiceResult<usize>
where
    R: ApplicantReader + ApplicantWriter + ?Sized,
{
    ensure_role(user, APPLICANT_ROLE)?;

    let applicant = current_applicant(repo, user)?;
    let payload = TranscriptPayload::try_from(TranscriptForm::from_bytes(body)?)?;
    let (grade, semester) = (payload.grade, payload.semester);
    let scores = payload.into_domain(applicant.id);

    repo.replace_transcript_scores(applicant.id, grade, semester, &scores)
        .map_err(|err| {
            log::error!("Failed to save transcript for {}: {err}", applicant.id);
            err.into()
        })
}

/// Stores the uploaded ID photo under `upload_dir` with a random file name.
///
/// The previous photo, if any, is removed once the new one is recorded.
pub fn upload_photo<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &mut UploadPhotoForm,
    upload_dir: &Path,
) -> ServiceResult<String>
where
    R: ApplicantReader + ApplicantWriter + ?Sized,
{
    ensure_role(user, APPLICANT_ROLE)?;

    let applicant = current_applicant(repo, user)?;
    let format = form.format()?;

    fs::create_dir_all(upload_dir).map_err(|e| ServiceError::Internal(e.to_string()))?;
    let file_name = format!("{}.{}", uuid::Uuid::new_v4(), format.extension());
    let destination = upload_dir.join(&file_name);
    fs::copy(form.photo.file.path(), &destination).map_err(|e| {
        log::error!("Failed to store photo at {}: {e}", destination.display());
        ServiceError::Internal(e.to_string())
    })?;

    if let Err(err) = repo.set_applicant_photo(applicant.id, &file_name) {
        log::error!("Failed to record photo for {}: {err}", applicant.id);
        let _ = fs::remove_file(&destination);
        return Err(err.into());
    }

    if let Some(previous) = applicant.photo_path {
        if let Err(e) = fs::remove_file(upload_dir.join(&previous)) {
            log::warn!("Failed to remove old photo {previous}: {e}");
        }
    }

    Ok(file_name)
}

/// Resolves the photo file of `applicant_id` for its owner or for staff.
pub fn photo_file<R>(
    repo: &R,
    user: &AuthenticatedUser,
    applicant_id: i32,
    upload_dir: &Path,
) -> ServiceResult<PathBuf>
where
    R: ApplicantReader + ?Sized,
{
    let applicant = repo
        .get_applicant_by_id(ApplicantId::new(applicant_id)?)?
        .ok_or(ServiceError::NotFound)?;

    let is_owner = user.has_role(APPLICANT_ROLE) && applicant.user_sub == user.sub;
    if !is_owner {
        ensure_role(user, SERVICE_ACCESS_ROLE)?;
    }

    applicant
        .photo_path
        .map(|name| upload_dir.join(name))
        .ok_or(ServiceError::NotFound)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::types::{ContactEmail, DisplayName, Gender, NationalId, PhoneNumber};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{admin_user, applicant_user, staff_user};

    fn applicant(sub: &str) -> ApplicantProfile {
        let created = NaiveDate::from_ymd_opt(2025, 3, 1)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap();
        ApplicantProfile {
            id: ApplicantId::new(7).unwrap(),
            user_sub: sub.to_string(),
            full_name: DisplayName::new("Nguyễn Văn An").unwrap(),
            date_of_birth: NaiveDate::from_ymd_opt(2007, 5, 20).unwrap(),
            gender: Gender::Male,
            national_id: NationalId::new("001207004321").unwrap(),
            phone: PhoneNumber::new("+84912345678").unwrap(),
            email: ContactEmail::new("an@example.com").unwrap(),
            address: None,
            region_id: None,
            photo_path: Some("old.jpg".to_string()),
            created_at: created,
            updated_at: created,
        }
    }

    fn profile_form() -> ProfileForm {
        ProfileForm {
            full_name: "Nguyễn Văn An".to_string(),
            date_of_birth: "2007-05-20".to_string(),
            gender: "male".to_string(),
            national_id: "001207004321".to_string(),
            phone: "0912345678".to_string(),
            email: "an@example.com".to_string(),
            address: None,
            region_id: Some("4".to_string()),
        }
    }

    #[test]
    fn staff_cannot_open_applicant_profile_page() {
        let mut repo = MockRepository::new();
        repo.expect_get_applicant_by_user().times(0);

        assert!(matches!(
            load_profile(&repo, &staff_user()),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn new_applicant_gets_empty_page() {
        let mut repo = MockRepository::new();
        repo.expect_get_applicant_by_user()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_list_learning_records().times(0);
        repo.expect_list_regions().times(1).returning(|| Ok(vec![]));

        let data = load_profile(&repo, &applicant_user()).unwrap();

        assert!(data.profile.is_none());
        assert!(data.learning_records.is_empty());
    }

    #[test]
    fn save_rejects_unknown_region() {
        let mut repo = MockRepository::new();
        repo.expect_get_region_by_id()
            .withf(|id| id.get() == 4)
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_save_applicant().times(0);

        assert!(matches!(
            save_profile(&repo, &applicant_user(), profile_form()),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn save_binds_profile_to_token_subject() {
        let mut repo = MockRepository::new();
        let mut form = profile_form();
        form.region_id = None;
        repo.expect_save_applicant()
            .withf(|profile| profile.user_sub == "applicant")
            .times(1)
            .returning(|profile| Ok(applicant(&profile.user_sub)));

        let saved = save_profile(&repo, &applicant_user(), form).unwrap();

        assert_eq!(saved.user_sub, "applicant");
    }

    #[test]
    fn history_requires_saved_profile() {
        let mut repo = MockRepository::new();
        repo.expect_get_applicant_by_user()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create_learning_record().times(0);
        let form = LearningRecordForm {
            grade: 10,
            school_year: "2022-2023".to_string(),
            school_name: "THPT Chu Văn An".to_string(),
            province: "Hà Nội".to_string(),
        };

        assert!(matches!(
            add_learning_record(&repo, &applicant_user(), form),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn deleting_foreign_record_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_applicant_by_user()
            .times(1)
            .returning(|sub| Ok(Some(applicant(sub))));
        repo.expect_delete_learning_record()
            .withf(|applicant_id, id| applicant_id.get() == 7 && id.get() == 99)
            .times(1)
            .returning(|_, _| Ok(0));

        assert!(matches!(
            delete_learning_record(&repo, &applicant_user(), 99),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn transcript_replaces_one_semester() {
        let mut repo = MockRepository::new();
        repo.expect_get_applicant_by_user()
            .times(1)
            .returning(|sub| Ok(Some(applicant(sub))));
        repo.expect_replace_transcript_scores()
            .withf(|applicant_id, grade, semester, scores| {
                applicant_id.get() == 7
                    && grade.get() == 12
                    && semester.get() == 1
                    && scores.len() == 2
            })
            .times(1)
            .returning(|_, _, _, scores| Ok(scores.len()));

        let body = b"grade=12&semester=1&subject=To%C3%A1n&score=9&subject=L%C3%BD&score=8.25";
        let written = save_transcript(&repo, &applicant_user(), body).unwrap();

        assert_eq!(written, 2);
    }

    #[test]
    fn staff_can_see_photo_but_other_applicants_cannot() {
        let mut repo = MockRepository::new();
        repo.expect_get_applicant_by_id()
            .times(2)
            .returning(|_| Ok(Some(applicant("someone-else"))));
        let dir = Path::new("/srv/uploads");

        let path = photo_file(&repo, &admin_user(), 7, dir).unwrap();
        assert_eq!(path, dir.join("old.jpg"));

        assert!(matches!(
            photo_file(&repo, &applicant_user(), 7, dir),
            Err(ServiceError::Unauthorized)
        ));
    }
}
