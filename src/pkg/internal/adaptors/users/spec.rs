use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Freelancer,
    Employer,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserEntry {
    pub id: i32,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: Option<String>,
    pub country: Option<String>,
    pub role: UserRole,
    pub bio: Option<String>,
    pub profile_picture_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Account fields safe to embed in other payloads.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PublicUser {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub country: Option<String>,
    pub role: UserRole,
}

impl From<&UserEntry> for PublicUser {
    fn from(user: &UserEntry) -> Self {
        PublicUser {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            country: user.country.clone(),
            role: user.role,
        }
    }
}
