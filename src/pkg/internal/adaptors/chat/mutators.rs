use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::chat::spec::{ChatRoomEntry, MessageEntry},
    prelude::Result,
};

pub struct ChatMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ChatMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ChatMutator { pool }
    }

    /// Rooms are unique per (job, employer, freelancer); repeated starts
    /// return the existing room.
    pub async fn get_or_create_room(
        &mut self,
        job_id: i32,
        employer_id: i32,
        freelancer_id: i32,
    ) -> Result<ChatRoomEntry> {
        let row = sqlx::query_as::<_, ChatRoomEntry>(
            r#"
            INSERT INTO chat_rooms (job_id, employer_id, freelancer_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (job_id, employer_id, freelancer_id)
            DO UPDATE SET job_id = EXCLUDED.job_id
            RETURNING id, job_id, employer_id, freelancer_id, created_at
            "#,
        )
        .bind(job_id)
        .bind(employer_id)
        .bind(freelancer_id)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn create_message(
        &mut self,
        room_id: i32,
        sender_id: i32,
        content: &str,
    ) -> Result<MessageEntry> {
        let row = sqlx::query_as::<_, MessageEntry>(
            r#"
            WITH inserted AS (
                INSERT INTO messages (room_id, sender_id, content)
                VALUES ($1, $2, $3)
                RETURNING id, room_id, sender_id, content, sent_at
            )
            SELECT i.id, i.room_id, i.sender_id, u.full_name as sender_full_name,
                   i.content, i.sent_at
            FROM inserted i JOIN users u ON u.id = i.sender_id
            "#,
        )
        .bind(room_id)
        .bind(sender_id)
        .bind(content)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }
}
