use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One chat message between the two parties of a job. Media lives in external
/// blob storage; only the public URLs are stored here.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct ChatMessage {
    pub id: Uuid,
    pub job_id: Uuid,
    pub sender_id: Uuid,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub audio_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
