use bigdecimal::BigDecimal;
use sqlx::{migrate::Migrator, postgres::PgPoolOptions, PgConnection, PgPool};
use standard_error::{Interpolate, StandardError};
use uuid::Uuid;

use crate::{
    pkg::internal::adaptors::{
        jobs::{
            mutators::{CreateJobData, JobMutator},
            spec::JobEntry,
        },
        users::{
            mutators::{CreateUserData, UserMutator},
            spec::{UserEntry, UserRole},
        },
    },
    prelude::Result,
};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Pool against the database named by DATABASE_URL, with migrations
/// applied. Returns None when the variable is unset so the suite can
/// still run without a live database.
pub async fn test_pool() -> Result<Option<PgPool>> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, skipping database-backed test");
            return Ok(None);
        }
    };
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await?;
    MIGRATOR
        .run(&pool)
        .await
        .map_err(|e| StandardError::new("ERR-DB-000").interpolate_err(e.to_string()))?;
    Ok(Some(pool))
}

pub async fn seed_user(tx: &mut PgConnection, role: UserRole) -> Result<UserEntry> {
    let tag = Uuid::new_v4().simple().to_string();
    UserMutator::new(tx)
        .create(CreateUserData {
            email: format!("{tag}@example.com"),
            username: tag,
            password_hash: "not-a-real-hash".into(),
            full_name: Some("Seed User".into()),
            country: None,
            role,
        })
        .await
}

pub async fn seed_job(tx: &mut PgConnection, employer_id: i32, skills: &str) -> Result<JobEntry> {
    JobMutator::new(tx)
        .create(CreateJobData {
            employer_id,
            title: "Backend engineer".into(),
            description: "Build and run the backend".into(),
            required_skills: skills.into(),
            budget: BigDecimal::from(500),
        })
        .await
}
