use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path as AxumPath, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use standard_error::{Interpolate, StandardError, Status};
use uuid::Uuid;

use crate::{
    conf::settings,
    pkg::{
        internal::{
            adaptors::resumes::{
                mutators::{PatchResumeData, ResumeMutator},
                selectors::ResumeSelector,
                spec::ResumeProfileEntry,
            },
            adaptors::users::spec::UserRole,
            auth::AuthUser,
            storage::S3Ops,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

#[derive(Deserialize)]
pub struct PatchResumeInput {
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
}

fn require_freelancer(user: &AuthUser) -> Result<()> {
    if user.role != UserRole::Freelancer {
        return Err(StandardError::new("ERR-ROLE-001").code(StatusCode::FORBIDDEN));
    }
    Ok(())
}

pub async fn retrieve(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<AuthUser>>,
) -> Result<Json<ResumeProfileEntry>> {
    require_freelancer(&user)?;
    let mut tx = state.db_pool.begin_txn().await?;
    let profile = ResumeMutator::new(&mut tx).get_or_create(user.id).await?;
    tx.commit().await?;
    Ok(Json(profile))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<AuthUser>>,
    Json(input): Json<PatchResumeInput>,
) -> Result<Json<ResumeProfileEntry>> {
    require_freelancer(&user)?;
    let mut tx = state.db_pool.begin_txn().await?;
    ResumeMutator::new(&mut tx).get_or_create(user.id).await?;
    let profile = ResumeMutator::new(&mut tx)
        .update(
            user.id,
            PatchResumeData {
                skills: input.skills,
                experience: input.experience,
                education: input.education,
            },
        )
        .await?
        .ok_or_else(|| StandardError::new("ERR-USER-002").code(StatusCode::NOT_FOUND))?;
    tx.commit().await?;
    Ok(Json(profile))
}

pub async fn retrieve_for_user(
    State(state): State<AppState>,
    AxumPath(user_id): AxumPath<i32>,
) -> Result<Json<ResumeProfileEntry>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let profile = ResumeSelector::new(&mut tx)
        .get_by_user(user_id)
        .await?
        .ok_or_else(|| StandardError::new("ERR-USER-002").code(StatusCode::NOT_FOUND))?;
    Ok(Json(profile))
}

/// Multipart upload of the resume PDF; the object lands in S3 and the
/// profile keeps its key. Scoring later pulls the bytes back down.
pub async fn upload(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<AuthUser>>,
    mut multipart: Multipart,
) -> Result<Json<ResumeProfileEntry>> {
    require_freelancer(&user)?;

    let mut file: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| StandardError::new("ERR-FILE-003").interpolate_err(e.to_string()))?
    {
        match field.name().unwrap_or("") {
            "resume" => {
                let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| StandardError::new("ERR-FILE-003").interpolate_err(e.to_string()))?;
                file = Some((file_name, data.into()));
            }
            _ => {
                let _ = field
                    .bytes()
                    .await
                    .map_err(|e| StandardError::new("ERR-FILE-003").interpolate_err(e.to_string()))?;
            }
        }
    }

    let (file_name, data) =
        file.ok_or_else(|| StandardError::new("ERR-FILE-003").code(StatusCode::BAD_REQUEST))?;

    let extension = Path::new(&file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();
    if extension != "pdf" {
        return Err(StandardError::new("ERR-FILE-001").code(StatusCode::BAD_REQUEST));
    }
    if data.len() > MAX_RESUME_BYTES {
        return Err(StandardError::new("ERR-FILE-002").code(StatusCode::BAD_REQUEST));
    }

    let key = format!("resumes/{}/{}.pdf", user.id, Uuid::new_v4());
    state
        .s3_client
        .upload_object(&settings.s3_bucket_name, &key, data, "application/pdf")
        .await?;

    let mut tx = state.db_pool.begin_txn().await?;
    ResumeMutator::new(&mut tx).get_or_create(user.id).await?;
    let profile = ResumeMutator::new(&mut tx)
        .set_file(user.id, &key, "application/pdf")
        .await?;
    tx.commit().await?;

    tracing::info!("stored resume for user {} at {}", user.id, &key);
    Ok(Json(profile))
}
