use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::proposals::spec::{
        ProposalEntry, ProposalStatus, ProposalWithFreelancer, ProposalWithJob,
    },
    prelude::Result,
};

pub struct ProposalSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ProposalSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ProposalSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<Option<ProposalEntry>> {
        let row = sqlx::query_as::<_, ProposalEntry>(
            "SELECT id, job_id, freelancer_id, cover_letter, score, status, submitted_at
             FROM proposals WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn exists(&mut self, job_id: i32, freelancer_id: i32) -> Result<bool> {
        let row: (bool,) = sqlx::query_as(
            "SELECT exists(SELECT 1 FROM proposals WHERE job_id = $1 AND freelancer_id = $2)",
        )
        .bind(job_id)
        .bind(freelancer_id)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row.0)
    }

    pub async fn shortlisted_exists(&mut self, job_id: i32, freelancer_id: i32) -> Result<bool> {
        let row: (bool,) = sqlx::query_as(
            "SELECT exists(SELECT 1 FROM proposals
             WHERE job_id = $1 AND freelancer_id = $2 AND status = $3)",
        )
        .bind(job_id)
        .bind(freelancer_id)
        .bind(ProposalStatus::Shortlisted)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row.0)
    }

    pub async fn get_by_freelancer(&mut self, freelancer_id: i32) -> Result<Vec<ProposalWithJob>> {
        let rows = sqlx::query_as::<_, ProposalWithJob>(
            "SELECT p.id, p.job_id, j.title as job_title, j.status as job_status,
                    p.freelancer_id, p.cover_letter, p.score, p.status, p.submitted_at
             FROM proposals p JOIN job_posts j ON j.id = p.job_id
             WHERE p.freelancer_id = $1
             ORDER BY p.submitted_at DESC",
        )
        .bind(freelancer_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_job(&mut self, job_id: i32) -> Result<Vec<ProposalWithFreelancer>> {
        let rows = sqlx::query_as::<_, ProposalWithFreelancer>(
            "SELECT p.id, p.job_id, p.freelancer_id, u.username as freelancer_username,
                    u.full_name as freelancer_full_name, p.cover_letter, p.score, p.status,
                    p.submitted_at
             FROM proposals p JOIN users u ON u.id = p.freelancer_id
             WHERE p.job_id = $1
             ORDER BY p.submitted_at DESC",
        )
        .bind(job_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
