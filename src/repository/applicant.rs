//! Repository implementation for applicant profiles and their school records.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::applicant::{
    ApplicantProfile, LearningRecord, NewApplicantProfile, NewLearningRecord, NewTranscriptScore,
    TranscriptScore,
};
use crate::domain::types::{ApplicantId, Grade, LearningRecordId, Semester};
use crate::models::applicant::{
    Applicant as DbApplicant, LearningRecord as DbLearningRecord, NewApplicant as DbNewApplicant,
    NewLearningRecord as DbNewLearningRecord, NewTranscriptScore as DbNewTranscriptScore,
    TranscriptScore as DbTranscriptScore, UpdateApplicant as DbUpdateApplicant,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ApplicantReader, ApplicantWriter, DieselRepository};

impl ApplicantReader for DieselRepository {
    fn list_applicants(&self) -> RepositoryResult<Vec<ApplicantProfile>> {
        use crate::schema::applicants;

        let mut conn = self.conn()?;
        applicants::table
            .order(applicants::full_name.asc())
            .load::<DbApplicant>(&mut conn)?
            .into_iter()
            .map(|row| ApplicantProfile::try_from(row).map_err(RepositoryError::from))
            .collect()
    }

    fn get_applicant_by_id(&self, id: ApplicantId) -> RepositoryResult<Option<ApplicantProfile>> {
        use crate::schema::applicants;

        let mut conn = self.conn()?;
        let row = applicants::table
            .find(id.get())
            .first::<DbApplicant>(&mut conn)
            .optional()?;

        row.map(|row| ApplicantProfile::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_applicant_by_user(&self, user_sub: &str) -> RepositoryResult<Option<ApplicantProfile>> {
        use crate::schema::applicants;

        let mut conn = self.conn()?;
        let row = applicants::table
            .filter(applicants::user_sub.eq(user_sub))
            .first::<DbApplicant>(&mut conn)
            .optional()?;

        row.map(|row| ApplicantProfile::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_learning_records(
        &self,
        applicant_id: ApplicantId,
    ) -> RepositoryResult<Vec<LearningRecord>> {
        use crate::schema::learning_records;

        let mut conn = self.conn()?;
        learning_records::table
            .filter(learning_records::applicant_id.eq(applicant_id.get()))
            .order(learning_records::grade.asc())
            .load::<DbLearningRecord>(&mut conn)?
            .into_iter()
            .map(|row| LearningRecord::try_from(row).map_err(RepositoryError::from))
            .collect()
    }

    fn list_transcript_scores(
        &self,
        applicant_id: ApplicantId,
    ) -> RepositoryResult<Vec<TranscriptScore>> {
        use crate::schema::transcript_scores;

        let mut conn = self.conn()?;
        transcript_scores::table
            .filter(transcript_scores::applicant_id.eq(applicant_id.get()))
            .order((
                transcript_scores::grade.asc(),
                transcript_scores::semester.asc(),
                transcript_scores::subject.asc(),
            ))
            .load::<DbTranscriptScore>(&mut conn)?
            .into_iter()
            .map(|row| TranscriptScore::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl ApplicantWriter for DieselRepository {
    fn save_applicant(&self, profile: &NewApplicantProfile) -> RepositoryResult<ApplicantProfile> {
        use crate::schema::applicants;

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let row = conn.transaction::<DbApplicant, diesel::result::Error, _>(|conn| {
            let existing = applicants::table
                .filter(applicants::user_sub.eq(&profile.user_sub))
                .select(applicants::id)
                .first::<i32>(conn)
                .optional()?;

            match existing {
                Some(id) => diesel::update(applicants::table.find(id))
                    .set(DbUpdateApplicant::new(profile, now))
                    .get_result::<DbApplicant>(conn),
                None => diesel::insert_into(applicants::table)
                    .values(DbNewApplicant::from(profile))
                    .get_result::<DbApplicant>(conn),
            }
        })?;

        Ok(ApplicantProfile::try_from(row)?)
    }

    fn set_applicant_photo(&self, id: ApplicantId, photo_path: &str) -> RepositoryResult<()> {
        use crate::schema::applicants;

        let mut conn = self.conn()?;
        let updated = diesel::update(applicants::table.find(id.get()))
            .set((
                applicants::photo_path.eq(photo_path),
                applicants::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;
        if updated == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn create_learning_record(
        &self,
        record: &NewLearningRecord,
    ) -> RepositoryResult<LearningRecord> {
        use crate::schema::learning_records;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(learning_records::table)
            .values(DbNewLearningRecord::from(record))
            .get_result::<DbLearningRecord>(&mut conn)?;

        Ok(LearningRecord::try_from(row)?)
    }

    fn delete_learning_record(
        &self,
        applicant_id: ApplicantId,
        id: LearningRecordId,
    ) -> RepositoryResult<usize> {
        use crate::schema::learning_records;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            learning_records::table
                .filter(learning_records::id.eq(id.get()))
                .filter(learning_records::applicant_id.eq(applicant_id.get())),
        )
        .execute(&mut conn)?;

        Ok(deleted)
    }

    fn replace_transcript_scores(
        &self,
        applicant_id: ApplicantId,
        grade: Grade,
        semester: Semester,
        scores: &[NewTranscriptScore],
    ) -> RepositoryResult<usize> {
        use crate::schema::transcript_scores;

        let mut conn = self.conn()?;
        let rows = scores
            .iter()
            .map(DbNewTranscriptScore::from)
            .collect::<Vec<_>>();

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            diesel::delete(
                transcript_scores::table
                    .filter(transcript_scores::applicant_id.eq(applicant_id.get()))
                    .filter(transcript_scores::grade.eq(grade.get()))
                    .filter(transcript_scores::semester.eq(semester.get())),
            )
            .execute(conn)?;

            if rows.is_empty() {
                return Ok(0);
            }

            diesel::insert_into(transcript_scores::table)
                .values(&rows)
                .execute(conn)
        })
        .map_err(RepositoryError::from)
    }
}
