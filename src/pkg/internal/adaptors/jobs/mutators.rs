use bigdecimal::BigDecimal;
use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::jobs::spec::{JobEntry, JobStatus},
    prelude::Result,
};

pub struct CreateJobData {
    pub employer_id: i32,
    pub title: String,
    pub description: String,
    pub required_skills: String,
    pub budget: BigDecimal,
}

pub struct PatchJobData {
    pub title: Option<String>,
    pub description: Option<String>,
    pub required_skills: Option<String>,
    pub budget: Option<BigDecimal>,
    pub status: Option<JobStatus>,
}

pub struct JobMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobMutator { pool }
    }

    pub async fn create(&mut self, job: CreateJobData) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            INSERT INTO job_posts (employer_id, title, description, required_skills, budget)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, employer_id, title, description, required_skills, budget, status, created_at
            "#,
        )
        .bind(job.employer_id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.required_skills)
        .bind(&job.budget)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&mut self, id: i32, job: PatchJobData) -> Result<Option<JobEntry>> {
        let mut query = String::from("UPDATE job_posts SET id = id");
        let mut param_count = 1;

        if job.title.is_some() {
            param_count += 1;
            query.push_str(&format!(", title = ${}", param_count));
        }
        if job.description.is_some() {
            param_count += 1;
            query.push_str(&format!(", description = ${}", param_count));
        }
        if job.required_skills.is_some() {
            param_count += 1;
            query.push_str(&format!(", required_skills = ${}", param_count));
        }
        if job.budget.is_some() {
            param_count += 1;
            query.push_str(&format!(", budget = ${}", param_count));
        }
        if job.status.is_some() {
            param_count += 1;
            query.push_str(&format!(", status = ${}", param_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, employer_id, title, description, required_skills, budget, status, created_at",
        );

        let mut q = sqlx::query_as::<_, JobEntry>(&query).bind(id);

        if let Some(title) = job.title {
            q = q.bind(title);
        }
        if let Some(description) = job.description {
            q = q.bind(description);
        }
        if let Some(required_skills) = job.required_skills {
            q = q.bind(required_skills);
        }
        if let Some(budget) = job.budget {
            q = q.bind(budget);
        }
        if let Some(status) = job.status {
            q = q.bind(status);
        }
        let row = q.fetch_optional(&mut *self.pool).await?;
        Ok(row)
    }

    pub async fn set_status(&mut self, id: i32, status: JobStatus) -> Result<()> {
        sqlx::query("UPDATE job_posts SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&mut *self.pool)
            .await?;
        Ok(())
    }

    pub async fn delete(&mut self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM job_posts WHERE id = $1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
