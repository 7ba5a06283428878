use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::resumes::spec::ResumeProfileEntry,
    prelude::Result,
};

pub struct PatchResumeData {
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
}

pub struct ResumeMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ResumeMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ResumeMutator { pool }
    }

    /// First read creates an empty profile for the user.
    pub async fn get_or_create(&mut self, user_id: i32) -> Result<ResumeProfileEntry> {
        let row = sqlx::query_as::<_, ResumeProfileEntry>(
            r#"
            INSERT INTO resume_profiles (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, skills, experience, education, resume_key, resume_mime,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(
        &mut self,
        user_id: i32,
        patch: PatchResumeData,
    ) -> Result<Option<ResumeProfileEntry>> {
        let mut query = String::from("UPDATE resume_profiles SET updated_at = CURRENT_TIMESTAMP");
        let mut param_count = 1;

        if patch.skills.is_some() {
            param_count += 1;
            query.push_str(&format!(", skills = ${}", param_count));
        }
        if patch.experience.is_some() {
            param_count += 1;
            query.push_str(&format!(", experience = ${}", param_count));
        }
        if patch.education.is_some() {
            param_count += 1;
            query.push_str(&format!(", education = ${}", param_count));
        }

        query.push_str(
            " WHERE user_id = $1 RETURNING id, user_id, skills, experience, education, resume_key,
              resume_mime, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, ResumeProfileEntry>(&query).bind(user_id);

        if let Some(skills) = patch.skills {
            q = q.bind(skills);
        }
        if let Some(experience) = patch.experience {
            q = q.bind(experience);
        }
        if let Some(education) = patch.education {
            q = q.bind(education);
        }
        let row = q.fetch_optional(&mut *self.pool).await?;
        Ok(row)
    }

    pub async fn set_file(
        &mut self,
        user_id: i32,
        resume_key: &str,
        resume_mime: &str,
    ) -> Result<ResumeProfileEntry> {
        let row = sqlx::query_as::<_, ResumeProfileEntry>(
            r#"
            UPDATE resume_profiles
            SET resume_key = $2, resume_mime = $3, updated_at = CURRENT_TIMESTAMP
            WHERE user_id = $1
            RETURNING id, user_id, skills, experience, education, resume_key, resume_mime,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(resume_key)
        .bind(resume_mime)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }
}
