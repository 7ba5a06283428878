use axum::http::StatusCode;
use sqlx::PgConnection;
use standard_error::{StandardError, Status};

use crate::{
    pkg::internal::adaptors::proposals::spec::{ProposalEntry, ProposalStatus},
    prelude::Result,
};

pub struct CreateProposalData {
    pub job_id: i32,
    pub freelancer_id: i32,
    pub cover_letter: String,
    pub score: f64,
}

pub struct ProposalMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ProposalMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ProposalMutator { pool }
    }

    pub async fn create(&mut self, proposal: CreateProposalData) -> Result<ProposalEntry> {
        let row = sqlx::query_as::<_, ProposalEntry>(
            r#"
            INSERT INTO proposals (job_id, freelancer_id, cover_letter, score)
            VALUES ($1, $2, $3, $4)
            RETURNING id, job_id, freelancer_id, cover_letter, score, status, submitted_at
            "#,
        )
        .bind(proposal.job_id)
        .bind(proposal.freelancer_id)
        .bind(&proposal.cover_letter)
        .bind(proposal.score)
        .fetch_one(&mut *self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(d) if d.is_unique_violation() => {
                StandardError::new("ERR-PROP-001").code(StatusCode::BAD_REQUEST)
            }
            _ => e.into(),
        })?;
        Ok(row)
    }

    pub async fn set_status(
        &mut self,
        id: i32,
        status: ProposalStatus,
    ) -> Result<ProposalEntry> {
        let row = sqlx::query_as::<_, ProposalEntry>(
            r#"
            UPDATE proposals SET status = $2
            WHERE id = $1
            RETURNING id, job_id, freelancer_id, cover_letter, score, status, submitted_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::pkg::internal::{
        adaptors::users::spec::UserRole,
        testutil::{seed_job, seed_user, test_pool},
    };

    #[tokio::test]
    #[traced_test]
    async fn second_proposal_for_same_job_and_freelancer_is_rejected() -> Result<()> {
        let Some(pool) = test_pool().await? else {
            return Ok(());
        };
        let mut tx = pool.begin().await?;
        let employer = seed_user(&mut tx, UserRole::Employer).await?;
        let freelancer = seed_user(&mut tx, UserRole::Freelancer).await?;
        let job = seed_job(&mut tx, employer.id, "rust, sql").await?;

        ProposalMutator::new(&mut tx)
            .create(CreateProposalData {
                job_id: job.id,
                freelancer_id: freelancer.id,
                cover_letter: "first application".into(),
                score: 50.0,
            })
            .await?;
        let err = ProposalMutator::new(&mut tx)
            .create(CreateProposalData {
                job_id: job.id,
                freelancer_id: freelancer.id,
                cover_letter: "second application".into(),
                score: 50.0,
            })
            .await
            .expect_err("duplicate proposal should be rejected");
        assert_eq!(err.err_code, "ERR-PROP-001");
        assert_eq!(err.status_code, StatusCode::BAD_REQUEST);

        tx.rollback().await?;
        Ok(())
    }
}
