use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use standard_error::{StandardError, Status};

use crate::{
    pkg::{
        internal::{
            adaptors::{
                chat::{
                    mutators::ChatMutator,
                    selectors::ChatSelector,
                    spec::{ChatRoomEntry, ChatRoomWithJob, MessageEntry},
                },
                jobs::{selectors::JobSelector, spec::JobEntry},
                proposals::selectors::ProposalSelector,
            },
            auth::AuthUser,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

#[derive(Deserialize)]
pub struct StartChatInput {
    pub job_id: i32,
    pub freelancer_id: i32,
}

#[derive(Deserialize)]
pub struct CreateMessageInput {
    pub content: String,
}

pub async fn rooms(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<AuthUser>>,
) -> Result<Json<Vec<ChatRoomWithJob>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let rooms = ChatSelector::new(&mut tx).rooms_for_user(user.id).await?;
    Ok(Json(rooms))
}

/// Get-or-create the room for (job, employer, freelancer). Only the two
/// parties may open it, and only once a proposal was shortlisted.
pub async fn start(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<AuthUser>>,
    Json(input): Json<StartChatInput>,
) -> Result<Json<ChatRoomEntry>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(input.job_id)
        .await?
        .ok_or_else(|| StandardError::new("ERR-JOB-001").code(StatusCode::NOT_FOUND))?;
    let room = open_room(&mut tx, &job, user.id, input.freelancer_id).await?;
    tx.commit().await?;
    Ok(Json(room))
}

async fn open_room(
    tx: &mut sqlx::PgConnection,
    job: &JobEntry,
    caller_id: i32,
    freelancer_id: i32,
) -> Result<ChatRoomEntry> {
    if caller_id != freelancer_id && caller_id != job.employer_id {
        return Err(StandardError::new("ERR-CHAT-002").code(StatusCode::FORBIDDEN));
    }
    if !ProposalSelector::new(&mut *tx)
        .shortlisted_exists(job.id, freelancer_id)
        .await?
    {
        return Err(StandardError::new("ERR-CHAT-003").code(StatusCode::FORBIDDEN));
    }

    let room = ChatMutator::new(tx)
        .get_or_create_room(job.id, job.employer_id, freelancer_id)
        .await?;
    Ok(room)
}

async fn member_room(
    tx: &mut sqlx::PgConnection,
    room_id: i32,
    user_id: i32,
) -> Result<ChatRoomEntry> {
    let room = ChatSelector::new(tx)
        .get_room(room_id)
        .await?
        .ok_or_else(|| StandardError::new("ERR-CHAT-001").code(StatusCode::NOT_FOUND))?;
    if !room.is_participant(user_id) {
        return Err(StandardError::new("ERR-CHAT-002").code(StatusCode::FORBIDDEN));
    }
    Ok(room)
}

pub async fn list_messages(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<AuthUser>>,
    Path(room_id): Path<i32>,
) -> Result<Json<Vec<MessageEntry>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    member_room(&mut tx, room_id, user.id).await?;
    let messages = ChatSelector::new(&mut tx).messages_for_room(room_id).await?;
    Ok(Json(messages))
}

pub async fn create_message(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<AuthUser>>,
    Path(room_id): Path<i32>,
    Json(input): Json<CreateMessageInput>,
) -> Result<Json<MessageEntry>> {
    if input.content.trim().is_empty() {
        return Err(StandardError::new("ERR-VAL-001").code(StatusCode::BAD_REQUEST));
    }
    let mut tx = state.db_pool.begin_txn().await?;
    member_room(&mut tx, room_id, user.id).await?;
    let message = ChatMutator::new(&mut tx)
        .create_message(room_id, user.id, input.content.trim())
        .await?;
    tx.commit().await?;
    Ok(Json(message))
}

#[cfg(test)]
mod tests {
    use sqlx::PgConnection;
    use tracing_test::traced_test;

    use super::*;
    use crate::pkg::internal::{
        adaptors::{
            proposals::{
                mutators::{CreateProposalData, ProposalMutator},
                spec::ProposalStatus,
            },
            users::spec::{UserEntry, UserRole},
        },
        testutil::{seed_job, seed_user, test_pool},
    };

    async fn seed_parties(tx: &mut PgConnection) -> Result<(UserEntry, UserEntry, JobEntry)> {
        let employer = seed_user(&mut *tx, UserRole::Employer).await?;
        let freelancer = seed_user(&mut *tx, UserRole::Freelancer).await?;
        let job = seed_job(&mut *tx, employer.id, "rust, sql").await?;
        Ok((employer, freelancer, job))
    }

    #[tokio::test]
    #[traced_test]
    async fn room_opens_only_after_shortlisting() -> Result<()> {
        let Some(pool) = test_pool().await? else {
            return Ok(());
        };
        let mut tx = pool.begin().await?;
        let (employer, freelancer, job) = seed_parties(&mut tx).await?;

        let err = open_room(&mut tx, &job, employer.id, freelancer.id)
            .await
            .expect_err("no proposal yet, room should stay closed");
        assert_eq!(err.err_code, "ERR-CHAT-003");

        let proposal = ProposalMutator::new(&mut tx)
            .create(CreateProposalData {
                job_id: job.id,
                freelancer_id: freelancer.id,
                cover_letter: "hire me".into(),
                score: 80.0,
            })
            .await?;
        let err = open_room(&mut tx, &job, employer.id, freelancer.id)
            .await
            .expect_err("pending proposal should not open the room");
        assert_eq!(err.err_code, "ERR-CHAT-003");

        ProposalMutator::new(&mut tx)
            .set_status(proposal.id, ProposalStatus::Shortlisted)
            .await?;
        let room = open_room(&mut tx, &job, employer.id, freelancer.id).await?;
        let again = open_room(&mut tx, &job, freelancer.id, freelancer.id).await?;
        assert_eq!(room.id, again.id);

        tx.rollback().await?;
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn outsiders_cannot_open_a_room() -> Result<()> {
        let Some(pool) = test_pool().await? else {
            return Ok(());
        };
        let mut tx = pool.begin().await?;
        let (_, freelancer, job) = seed_parties(&mut tx).await?;
        let outsider = seed_user(&mut tx, UserRole::Employer).await?;

        let err = open_room(&mut tx, &job, outsider.id, freelancer.id)
            .await
            .expect_err("only the two parties may open the room");
        assert_eq!(err.err_code, "ERR-CHAT-002");

        tx.rollback().await?;
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn messages_come_back_in_send_order() -> Result<()> {
        let Some(pool) = test_pool().await? else {
            return Ok(());
        };
        let mut tx = pool.begin().await?;
        let (employer, freelancer, job) = seed_parties(&mut tx).await?;
        let proposal = ProposalMutator::new(&mut tx)
            .create(CreateProposalData {
                job_id: job.id,
                freelancer_id: freelancer.id,
                cover_letter: "hire me".into(),
                score: 80.0,
            })
            .await?;
        ProposalMutator::new(&mut tx)
            .set_status(proposal.id, ProposalStatus::Shortlisted)
            .await?;
        let room = open_room(&mut tx, &job, employer.id, freelancer.id).await?;

        for (sender, content) in [
            (employer.id, "hello"),
            (freelancer.id, "hi there"),
            (employer.id, "when can you start?"),
        ] {
            ChatMutator::new(&mut tx)
                .create_message(room.id, sender, content)
                .await?;
        }

        let messages = ChatSelector::new(&mut tx).messages_for_room(room.id).await?;
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["hello", "hi there", "when can you start?"]);
        for pair in messages.windows(2) {
            assert!(pair[0].sent_at <= pair[1].sent_at);
            assert!(pair[0].id < pair[1].id);
        }

        tx.rollback().await?;
        Ok(())
    }
}
