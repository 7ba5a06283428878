use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use standard_error::{StandardError, Status};

use crate::{
    conf::settings,
    pkg::{
        internal::{
            adaptors::{
                jobs::{mutators::JobMutator, selectors::JobSelector},
                proposals::{
                    mutators::{CreateProposalData, ProposalMutator},
                    selectors::ProposalSelector,
                    spec::{
                        job_status_after, ProposalEntry, ProposalStatus, ProposalWithFreelancer,
                        ProposalWithJob,
                    },
                },
                resumes::selectors::ResumeSelector,
                users::spec::UserRole,
            },
            auth::AuthUser,
            extract::extract_text_from_pdf,
            matching::score_profile,
            storage::S3Ops,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

#[derive(Deserialize)]
pub struct CreateProposalInput {
    pub job_id: i32,
    pub cover_letter: String,
}

#[derive(Deserialize)]
pub struct UpdateProposalStatusInput {
    pub status: ProposalStatus,
}

/// Submits a proposal and computes its match score in the same request.
/// The score is persisted once and never recomputed; a missing profile
/// scores 0 and a broken resume file degrades to the text fields alone.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<AuthUser>>,
    Json(input): Json<CreateProposalInput>,
) -> Result<Json<ProposalEntry>> {
    if user.role != UserRole::Freelancer {
        return Err(StandardError::new("ERR-ROLE-001").code(StatusCode::FORBIDDEN));
    }

    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(input.job_id)
        .await?
        .ok_or_else(|| StandardError::new("ERR-JOB-001").code(StatusCode::NOT_FOUND))?;

    if ProposalSelector::new(&mut tx)
        .exists(job.id, user.id)
        .await?
    {
        return Err(StandardError::new("ERR-PROP-001").code(StatusCode::BAD_REQUEST));
    }

    let score = match ResumeSelector::new(&mut tx).get_by_user(user.id).await? {
        Some(profile) => {
            let mut resume_text = String::new();
            if let Some(key) = &profile.resume_key {
                match S3Ops::get_object(state.s3_client.as_ref(), &settings.s3_bucket_name, key).await
                {
                    Ok(bytes) => match extract_text_from_pdf(&bytes) {
                        Ok(text) => resume_text = text,
                        Err(e) => tracing::warn!("resume extraction failed: {}", e),
                    },
                    Err(e) => tracing::warn!("resume download failed: {}", e),
                }
            }
            score_profile(
                &profile.skills,
                &profile.experience,
                &profile.education,
                &resume_text,
                &job.required_skills,
            )
        }
        None => 0.0,
    };

    let proposal = ProposalMutator::new(&mut tx)
        .create(CreateProposalData {
            job_id: job.id,
            freelancer_id: user.id,
            cover_letter: input.cover_letter,
            score,
        })
        .await?;
    tx.commit().await?;

    tracing::info!(
        "proposal {} for job {} scored {}",
        proposal.id,
        job.id,
        proposal.score
    );
    Ok(Json(proposal))
}

pub async fn list_mine(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<AuthUser>>,
) -> Result<Json<Vec<ProposalWithJob>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let proposals = ProposalSelector::new(&mut tx)
        .get_by_freelancer(user.id)
        .await?;
    Ok(Json(proposals))
}

pub async fn has_applied(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<AuthUser>>,
    Path(job_id): Path<i32>,
) -> Result<Json<Value>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let exists = ProposalSelector::new(&mut tx)
        .exists(job_id, user.id)
        .await?;
    Ok(Json(json!({ "has_applied": exists })))
}

pub async fn list_for_job(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<AuthUser>>,
    Path(job_id): Path<i32>,
) -> Result<Json<Vec<ProposalWithFreelancer>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(job_id)
        .await?
        .ok_or_else(|| StandardError::new("ERR-JOB-001").code(StatusCode::NOT_FOUND))?;
    if job.employer_id != user.id {
        return Err(StandardError::new("ERR-PERM-001").code(StatusCode::FORBIDDEN));
    }
    let proposals = ProposalSelector::new(&mut tx).get_by_job(job_id).await?;
    Ok(Json(proposals))
}

/// Owning employer moves a proposal through pending → shortlisted|rejected.
/// Shortlisting closes the job; rejecting reopens it.
pub async fn update_status(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<AuthUser>>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateProposalStatusInput>,
) -> Result<Json<ProposalEntry>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let proposal = ProposalSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or_else(|| StandardError::new("ERR-PROP-002").code(StatusCode::NOT_FOUND))?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(proposal.job_id)
        .await?
        .ok_or_else(|| StandardError::new("ERR-JOB-001").code(StatusCode::NOT_FOUND))?;
    if job.employer_id != user.id {
        return Err(StandardError::new("ERR-PERM-001").code(StatusCode::FORBIDDEN));
    }

    let proposal = ProposalMutator::new(&mut tx)
        .set_status(id, input.status)
        .await?;
    if let Some(job_status) = job_status_after(input.status) {
        JobMutator::new(&mut tx)
            .set_status(job.id, job_status)
            .await?;
    }
    tx.commit().await?;
    Ok(Json(proposal))
}
