use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use standard_error::{Interpolate, StandardError, Status};
use validator::Validate;

use crate::{
    conf::settings,
    pkg::{
        internal::{
            adaptors::users::{
                mutators::{CreateUserData, UserMutator},
                selectors::UserSelector,
                spec::{PublicUser, UserRole},
            },
            auth::{
                hash_password, issue_access_token, issue_token_pair, username_from_email,
                verify_password, verify_token, TokenKind,
            },
        },
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

#[derive(Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(email)]
    pub email: String,
    pub username: Option<String>,
    #[validate(length(min = 6))]
    pub password: String,
    pub password2: String,
    pub full_name: Option<String>,
    pub country: Option<String>,
    pub role: UserRole,
}

#[derive(Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub id: i32,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub role: UserRole,
    pub profile_picture: Option<String>,
}

#[derive(Deserialize)]
pub struct RefreshInput {
    pub refresh: String,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub access: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<Json<PublicUser>> {
    input.validate().map_err(|e| {
        StandardError::new("ERR-VAL-001")
            .interpolate_err(e.to_string())
            .code(StatusCode::BAD_REQUEST)
    })?;
    if input.password != input.password2 {
        return Err(StandardError::new("ERR-AUTH-005").code(StatusCode::BAD_REQUEST));
    }

    let username = input
        .username
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| username_from_email(&input.email));

    let mut tx = state.db_pool.begin_txn().await?;
    let user = UserMutator::new(&mut tx)
        .create(CreateUserData {
            email: input.email,
            username,
            password_hash: hash_password(&input.password)?,
            full_name: input.full_name,
            country: input.country,
            role: input.role,
        })
        .await?;
    tx.commit().await?;

    tracing::info!("registered {} as {:?}", &user.username, &user.role);
    Ok(Json(PublicUser::from(&user)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<LoginResponse>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let user = UserSelector::new(&mut tx)
        .get_by_email(&input.email)
        .await?
        .ok_or_else(|| StandardError::new("ERR-AUTH-003").code(StatusCode::UNAUTHORIZED))?;

    if !verify_password(&input.password, &user.password_hash) {
        return Err(StandardError::new("ERR-AUTH-003").code(StatusCode::UNAUTHORIZED));
    }

    let pair = issue_token_pair(&user, &settings.jwt_secret)?;
    Ok(Json(LoginResponse {
        access: pair.access,
        refresh: pair.refresh,
        id: user.id,
        email: user.email,
        username: user.username,
        full_name: user.full_name,
        role: user.role,
        profile_picture: user.profile_picture_key,
    }))
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshInput>,
) -> Result<Json<RefreshResponse>> {
    let claims = verify_token(&input.refresh, TokenKind::Refresh, &settings.jwt_secret)?;

    let mut tx = state.db_pool.begin_txn().await?;
    let user = UserSelector::new(&mut tx)
        .get_by_id(claims.sub)
        .await?
        .ok_or_else(|| StandardError::new("ERR-AUTH-002").code(StatusCode::UNAUTHORIZED))?;

    let access = issue_access_token(&user, &settings.jwt_secret)?;
    Ok(Json(RefreshResponse { access }))
}
