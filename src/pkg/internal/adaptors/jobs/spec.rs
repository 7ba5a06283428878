use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Open,
    Closed,
    Matched,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobEntry {
    pub id: i32,
    pub employer_id: i32,
    pub title: String,
    pub description: String,
    pub required_skills: String,
    pub budget: BigDecimal,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

/// Job row joined with the owning employer's public fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobWithEmployer {
    pub id: i32,
    pub employer_id: i32,
    pub employer_username: String,
    pub employer_full_name: Option<String>,
    pub employer_country: Option<String>,
    pub title: String,
    pub description: String,
    pub required_skills: String,
    pub budget: BigDecimal,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}
