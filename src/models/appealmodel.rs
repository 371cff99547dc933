use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "appeal_status", rename_all = "snake_case")]
pub enum AppealStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct PunishmentAppeal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub appeal_text: String,
    pub status: AppealStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
}
