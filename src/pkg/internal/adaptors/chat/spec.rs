use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatRoomEntry {
    pub id: i32,
    pub job_id: i32,
    pub employer_id: i32,
    pub freelancer_id: i32,
    pub created_at: DateTime<Utc>,
}

impl ChatRoomEntry {
    pub fn is_participant(&self, user_id: i32) -> bool {
        self.employer_id == user_id || self.freelancer_id == user_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatRoomWithJob {
    pub id: i32,
    pub job_id: i32,
    pub job_title: String,
    pub employer_id: i32,
    pub freelancer_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MessageEntry {
    pub id: i32,
    pub room_id: i32,
    pub sender_id: i32,
    pub sender_full_name: Option<String>,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn room() -> ChatRoomEntry {
        ChatRoomEntry {
            id: 1,
            job_id: 10,
            employer_id: 2,
            freelancer_id: 3,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn both_sides_are_participants() {
        assert!(room().is_participant(2));
        assert!(room().is_participant(3));
    }

    #[test]
    fn outsiders_are_not_participants() {
        assert!(!room().is_participant(4));
    }
}
