use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use standard_error::{StandardError, Status};

use crate::{
    pkg::{
        internal::{
            adaptors::{
                jobs::{
                    mutators::{CreateJobData, JobMutator, PatchJobData},
                    selectors::JobSelector,
                    spec::{JobEntry, JobStatus, JobWithEmployer},
                },
                users::spec::UserRole,
            },
            auth::AuthUser,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

const DEFAULT_PAGE_SIZE: u32 = 6;
const MAX_PAGE_SIZE: u32 = 50;

#[derive(Deserialize)]
pub struct JobListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
}

#[derive(Serialize)]
pub struct JobListResponse {
    pub count: i64,
    pub results: Vec<JobWithEmployer>,
}

#[derive(Deserialize)]
pub struct CreateJobInput {
    pub title: String,
    pub description: String,
    pub required_skills: String,
    pub budget: BigDecimal,
}

#[derive(Deserialize)]
pub struct PatchJobInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub required_skills: Option<String>,
    pub budget: Option<BigDecimal>,
    pub status: Option<JobStatus>,
}

fn page_bounds(page: Option<u32>, page_size: Option<u32>) -> (i64, i64) {
    let page = page.unwrap_or(1).max(1) as i64;
    let size = page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE) as i64;
    (size, (page - 1) * size)
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<Json<JobListResponse>> {
    let (limit, offset) = page_bounds(query.page, query.page_size);
    let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let mut tx = state.db_pool.begin_txn().await?;
    let count = JobSelector::new(&mut tx).count_open(search).await?;
    let results = JobSelector::new(&mut tx)
        .list_open(search, limit, offset)
        .await?;
    Ok(Json(JobListResponse { count, results }))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<AuthUser>>,
    Json(input): Json<CreateJobInput>,
) -> Result<Json<JobEntry>> {
    if user.role != UserRole::Employer {
        return Err(StandardError::new("ERR-ROLE-002").code(StatusCode::FORBIDDEN));
    }
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobMutator::new(&mut tx)
        .create(CreateJobData {
            employer_id: user.id,
            title: input.title,
            description: input.description,
            required_skills: input.required_skills,
            budget: input.budget,
        })
        .await?;
    tx.commit().await?;
    tracing::info!("employer {} posted job {}", user.id, job.id);
    Ok(Json(job))
}

pub async fn list_for_employer(
    State(state): State<AppState>,
    Path(employer_id): Path<i32>,
) -> Result<Json<Vec<JobWithEmployer>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let jobs = JobSelector::new(&mut tx).get_by_employer(employer_id).await?;
    Ok(Json(jobs))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<JobWithEmployer>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_detail(id)
        .await?
        .ok_or_else(|| StandardError::new("ERR-JOB-001").code(StatusCode::NOT_FOUND))?;
    Ok(Json(job))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<AuthUser>>,
    Path(id): Path<i32>,
    Json(input): Json<PatchJobInput>,
) -> Result<Json<JobEntry>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or_else(|| StandardError::new("ERR-JOB-001").code(StatusCode::NOT_FOUND))?;
    if job.employer_id != user.id {
        return Err(StandardError::new("ERR-PERM-001").code(StatusCode::FORBIDDEN));
    }
    let job = JobMutator::new(&mut tx)
        .update(
            id,
            PatchJobData {
                title: input.title,
                description: input.description,
                required_skills: input.required_skills,
                budget: input.budget,
                status: input.status,
            },
        )
        .await?
        .ok_or_else(|| StandardError::new("ERR-JOB-001").code(StatusCode::NOT_FOUND))?;
    tx.commit().await?;
    Ok(Json(job))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<AuthUser>>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or_else(|| StandardError::new("ERR-JOB-001").code(StatusCode::NOT_FOUND))?;
    if job.employer_id != user.id {
        return Err(StandardError::new("ERR-PERM-001").code(StatusCode::FORBIDDEN));
    }
    JobMutator::new(&mut tx).delete(id).await?;
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::page_bounds;

    #[test]
    fn defaults_to_first_page_of_six() {
        assert_eq!(page_bounds(None, None), (6, 0));
    }

    #[test]
    fn offset_scales_with_the_page() {
        assert_eq!(page_bounds(Some(3), Some(10)), (10, 20));
    }

    #[test]
    fn page_zero_is_treated_as_page_one() {
        assert_eq!(page_bounds(Some(0), None), (6, 0));
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(page_bounds(Some(1), Some(500)), (50, 0));
        assert_eq!(page_bounds(Some(1), Some(0)), (1, 0));
    }
}
