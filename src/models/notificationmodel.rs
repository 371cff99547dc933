use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How long a read notification stays visible before the read-time filter
/// hides it.
pub const READ_RETENTION_DAYS: i64 = 3;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    // Opaque navigation target the frontend decodes, e.g. {"job_id": "..."}.
    pub action_link: Option<serde_json::Value>,
    pub read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Visibility rule: unread, or read within the retention window. Applied
    /// at read time; old rows are only removed by the cleanup job.
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        if !self.read {
            return true;
        }
        match self.read_at {
            Some(read_at) => now - read_at <= Duration::days(READ_RETENTION_DAYS),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(read: bool, read_at: Option<DateTime<Utc>>) -> Notification {
        Notification {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            title: "t".to_string(),
            message: "m".to_string(),
            notification_type: "job_accepted".to_string(),
            action_link: None,
            read,
            read_at,
            created_at: Some(Utc::now()),
        }
    }

    #[test]
    fn unread_always_visible() {
        let now = Utc::now();
        assert!(notification(false, None).is_visible(now));
    }

    #[test]
    fn read_visible_inside_retention_window() {
        let now = Utc::now();
        let recent = notification(true, Some(now - Duration::days(2)));
        assert!(recent.is_visible(now));

        let old = notification(true, Some(now - Duration::days(4)));
        assert!(!old.is_visible(now));
    }
}
