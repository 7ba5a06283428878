use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
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
            adaptors::users::{
                mutators::{PatchUserData, UserMutator},
                selectors::UserSelector,
                spec::UserEntry,
            },
            auth::AuthUser,
            storage::S3Ops,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

const MAX_PICTURE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Deserialize)]
pub struct PatchProfileInput {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub country: Option<String>,
    pub bio: Option<String>,
}

pub async fn retrieve(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<AuthUser>>,
) -> Result<Json<UserEntry>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let entry = UserSelector::new(&mut tx)
        .get_by_id(user.id)
        .await?
        .ok_or_else(|| StandardError::new("ERR-USER-002").code(StatusCode::NOT_FOUND))?;
    Ok(Json(entry))
}

/// Email is immutable; the patch covers the remaining account fields.
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<AuthUser>>,
    Json(input): Json<PatchProfileInput>,
) -> Result<Json<UserEntry>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let entry = UserMutator::new(&mut tx)
        .update_profile(
            user.id,
            PatchUserData {
                username: input.username,
                full_name: input.full_name,
                country: input.country,
                bio: input.bio,
            },
        )
        .await?
        .ok_or_else(|| StandardError::new("ERR-USER-002").code(StatusCode::NOT_FOUND))?;
    tx.commit().await?;
    Ok(Json(entry))
}

fn picture_mime(extension: &str) -> Option<&'static str> {
    match extension {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

pub async fn upload_picture(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<AuthUser>>,
    mut multipart: Multipart,
) -> Result<Json<UserEntry>> {
    let mut file: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| StandardError::new("ERR-FILE-003").interpolate_err(e.to_string()))?
    {
        match field.name().unwrap_or("") {
            "picture" => {
                let file_name = field.file_name().unwrap_or("picture.png").to_string();
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
    let mime = picture_mime(&extension)
        .ok_or_else(|| StandardError::new("ERR-FILE-004").code(StatusCode::BAD_REQUEST))?;
    if data.len() > MAX_PICTURE_BYTES {
        return Err(StandardError::new("ERR-FILE-002").code(StatusCode::BAD_REQUEST));
    }

    let key = format!("profiles/{}/{}.{}", user.id, Uuid::new_v4(), extension);
    state
        .s3_client
        .upload_object(&settings.s3_bucket_name, &key, data, mime)
        .await?;

    let mut tx = state.db_pool.begin_txn().await?;
    let entry = UserMutator::new(&mut tx)
        .set_profile_picture(user.id, &key)
        .await?
        .ok_or_else(|| StandardError::new("ERR-USER-002").code(StatusCode::NOT_FOUND))?;
    tx.commit().await?;

    tracing::info!("stored profile picture for user {} at {}", user.id, &key);
    Ok(Json(entry))
}

#[cfg(test)]
mod tests {
    use super::picture_mime;

    #[test]
    fn jpeg_and_png_extensions_map_to_image_mimes() {
        assert_eq!(picture_mime("jpg"), Some("image/jpeg"));
        assert_eq!(picture_mime("jpeg"), Some("image/jpeg"));
        assert_eq!(picture_mime("png"), Some("image/png"));
    }

    #[test]
    fn other_extensions_are_rejected() {
        assert_eq!(picture_mime("pdf"), None);
        assert_eq!(picture_mime("svg"), None);
        assert_eq!(picture_mime(""), None);
    }
}
