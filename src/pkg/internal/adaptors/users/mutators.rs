use axum::http::StatusCode;
use sqlx::PgConnection;
use standard_error::{StandardError, Status};

use crate::{
    pkg::internal::adaptors::users::spec::{UserEntry, UserRole},
    prelude::Result,
};

pub struct CreateUserData {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub country: Option<String>,
    pub role: UserRole,
}

pub struct PatchUserData {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub country: Option<String>,
    pub bio: Option<String>,
}

pub struct UserMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> UserMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        UserMutator { pool }
    }

    pub async fn create(&mut self, user: CreateUserData) -> Result<UserEntry> {
        let row = sqlx::query_as::<_, UserEntry>(
            r#"
            INSERT INTO users (email, username, password_hash, full_name, country, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, username, password_hash, full_name, country, role, bio, profile_picture_key, created_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(&user.country)
        .bind(user.role)
        .fetch_one(&mut *self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(d) if d.is_unique_violation() => {
                StandardError::new("ERR-USER-001").code(StatusCode::BAD_REQUEST)
            }
            _ => e.into(),
        })?;
        Ok(row)
    }

    pub async fn set_profile_picture(&mut self, id: i32, key: &str) -> Result<Option<UserEntry>> {
        let row = sqlx::query_as::<_, UserEntry>(
            r#"
            UPDATE users SET profile_picture_key = $2
            WHERE id = $1
            RETURNING id, email, username, password_hash, full_name, country, role, bio, profile_picture_key, created_at
            "#,
        )
        .bind(id)
        .bind(key)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update_profile(&mut self, id: i32, patch: PatchUserData) -> Result<Option<UserEntry>> {
        let mut query = String::from("UPDATE users SET id = id");
        let mut param_count = 1;

        if patch.username.is_some() {
            param_count += 1;
            query.push_str(&format!(", username = ${}", param_count));
        }
        if patch.full_name.is_some() {
            param_count += 1;
            query.push_str(&format!(", full_name = ${}", param_count));
        }
        if patch.country.is_some() {
            param_count += 1;
            query.push_str(&format!(", country = ${}", param_count));
        }
        if patch.bio.is_some() {
            param_count += 1;
            query.push_str(&format!(", bio = ${}", param_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, email, username, password_hash, full_name, country, role, bio, profile_picture_key, created_at",
        );

        let mut q = sqlx::query_as::<_, UserEntry>(&query).bind(id);

        if let Some(username) = patch.username {
            q = q.bind(username);
        }
        if let Some(full_name) = patch.full_name {
            q = q.bind(full_name);
        }
        if let Some(country) = patch.country {
            q = q.bind(country);
        }
        if let Some(bio) = patch.bio {
            q = q.bind(bio);
        }
        let row = q.fetch_optional(&mut *self.pool).await.map_err(|e| match &e {
            sqlx::Error::Database(d) if d.is_unique_violation() => {
                StandardError::new("ERR-USER-001").code(StatusCode::BAD_REQUEST)
            }
            _ => e.into(),
        })?;
        Ok(row)
    }
}
