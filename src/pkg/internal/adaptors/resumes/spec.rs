use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeProfileEntry {
    pub id: i32,
    pub user_id: i32,
    pub skills: String,
    pub experience: String,
    pub education: String,
    pub resume_key: Option<String>,
    pub resume_mime: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
