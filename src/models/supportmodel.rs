use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "support_status", rename_all = "snake_case")]
pub enum SupportStatus {
    Open,
    Answered,
    Closed,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct SupportMessage {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject: String,
    pub message: String,
    pub status: SupportStatus,
    pub admin_reply: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub replied_at: Option<DateTime<Utc>>,
}
