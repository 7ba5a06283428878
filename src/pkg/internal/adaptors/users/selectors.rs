use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::users::spec::UserEntry,
    prelude::Result,
};

pub struct UserSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> UserSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        UserSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<Option<UserEntry>> {
        let row = sqlx::query_as::<_, UserEntry>(
            "SELECT id, email, username, password_hash, full_name, country, role, bio, profile_picture_key, created_at
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_by_email(&mut self, email: &str) -> Result<Option<UserEntry>> {
        let row = sqlx::query_as::<_, UserEntry>(
            "SELECT id, email, username, password_hash, full_name, country, role, bio, profile_picture_key, created_at
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }
}
