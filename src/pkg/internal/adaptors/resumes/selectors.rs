use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::resumes::spec::ResumeProfileEntry,
    prelude::Result,
};

pub struct ResumeSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ResumeSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ResumeSelector { pool }
    }

    pub async fn get_by_user(&mut self, user_id: i32) -> Result<Option<ResumeProfileEntry>> {
        let row = sqlx::query_as::<_, ResumeProfileEntry>(
            "SELECT id, user_id, skills, experience, education, resume_key, resume_mime,
                    created_at, updated_at
             FROM resume_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }
}
