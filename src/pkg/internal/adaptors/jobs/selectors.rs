use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::jobs::spec::{JobEntry, JobWithEmployer},
    prelude::Result,
};

const JOB_WITH_EMPLOYER_COLUMNS: &str = "j.id, j.employer_id, u.username as employer_username,
       u.full_name as employer_full_name, u.country as employer_country,
       j.title, j.description, j.required_skills, j.budget, j.status, j.created_at";

pub struct JobSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            "SELECT id, employer_id, title, description, required_skills, budget, status, created_at
             FROM job_posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_detail(&mut self, id: i32) -> Result<Option<JobWithEmployer>> {
        let query = format!(
            "SELECT {JOB_WITH_EMPLOYER_COLUMNS}
             FROM job_posts j JOIN users u ON u.id = j.employer_id
             WHERE j.id = $1"
        );
        let row = sqlx::query_as::<_, JobWithEmployer>(&query)
            .bind(id)
            .fetch_optional(&mut *self.pool)
            .await?;
        Ok(row)
    }

    /// Open jobs, newest first, with an optional search over title,
    /// required skills and description.
    pub async fn list_open(
        &mut self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<JobWithEmployer>> {
        let query = format!(
            "SELECT {JOB_WITH_EMPLOYER_COLUMNS}
             FROM job_posts j JOIN users u ON u.id = j.employer_id
             WHERE j.status = 'open'
               AND ($1::text IS NULL
                    OR j.title ILIKE '%' || $1 || '%'
                    OR j.required_skills ILIKE '%' || $1 || '%'
                    OR j.description ILIKE '%' || $1 || '%')
             ORDER BY j.created_at DESC
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, JobWithEmployer>(&query)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn count_open(&mut self, search: Option<&str>) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT count(*) FROM job_posts j
             WHERE j.status = 'open'
               AND ($1::text IS NULL
                    OR j.title ILIKE '%' || $1 || '%'
                    OR j.required_skills ILIKE '%' || $1 || '%'
                    OR j.description ILIKE '%' || $1 || '%')",
        )
        .bind(search)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(count.0)
    }

    pub async fn get_by_employer(&mut self, employer_id: i32) -> Result<Vec<JobWithEmployer>> {
        let query = format!(
            "SELECT {JOB_WITH_EMPLOYER_COLUMNS}
             FROM job_posts j JOIN users u ON u.id = j.employer_id
             WHERE j.employer_id = $1
             ORDER BY j.created_at DESC"
        );
        let rows = sqlx::query_as::<_, JobWithEmployer>(&query)
            .bind(employer_id)
            .fetch_all(&mut *self.pool)
            .await?;
        Ok(rows)
    }
}
