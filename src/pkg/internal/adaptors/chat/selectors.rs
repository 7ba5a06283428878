use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::chat::spec::{ChatRoomEntry, ChatRoomWithJob, MessageEntry},
    prelude::Result,
};

pub struct ChatSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ChatSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ChatSelector { pool }
    }

    pub async fn get_room(&mut self, room_id: i32) -> Result<Option<ChatRoomEntry>> {
        let row = sqlx::query_as::<_, ChatRoomEntry>(
            "SELECT id, job_id, employer_id, freelancer_id, created_at
             FROM chat_rooms WHERE id = $1",
        )
        .bind(room_id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn rooms_for_user(&mut self, user_id: i32) -> Result<Vec<ChatRoomWithJob>> {
        let rows = sqlx::query_as::<_, ChatRoomWithJob>(
            "SELECT r.id, r.job_id, j.title as job_title, r.employer_id, r.freelancer_id,
                    r.created_at
             FROM chat_rooms r JOIN job_posts j ON j.id = r.job_id
             WHERE r.employer_id = $1 OR r.freelancer_id = $1
             ORDER BY r.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    /// Messages in a room, oldest first.
    pub async fn messages_for_room(&mut self, room_id: i32) -> Result<Vec<MessageEntry>> {
        let rows = sqlx::query_as::<_, MessageEntry>(
            "SELECT m.id, m.room_id, m.sender_id, u.full_name as sender_full_name,
                    m.content, m.sent_at
             FROM messages m JOIN users u ON u.id = m.sender_id
             WHERE m.room_id = $1
             ORDER BY m.sent_at ASC, m.id ASC",
        )
        .bind(room_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
