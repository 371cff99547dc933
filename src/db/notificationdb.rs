use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::notificationmodel::{Notification, READ_RETENTION_DAYS};

const NOTIFICATION_COLUMNS: &str = r#"
    id, user_id, title, message, notification_type, action_link,
    read, read_at, created_at
"#;

#[async_trait]
pub trait NotificationExt {
    async fn insert_notification(
        &self,
        user_id: Uuid,
        title: String,
        message: String,
        notification_type: String,
        action_link: Option<serde_json::Value>,
    ) -> Result<Notification, Error>;

    /// Rows passing the visibility rule: unread, or read inside the
    /// retention window.
    async fn get_visible_notifications(&self, user_id: Uuid) -> Result<Vec<Notification>, Error>;

    async fn count_unread(&self, user_id: Uuid) -> Result<i64, Error>;

    async fn mark_notification_read(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
    ) -> Result<Notification, Error>;

    async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, Error>;

    /// Drop read rows past the retention window.
    async fn cleanup_old_notifications(&self) -> Result<u64, Error>;
}

#[async_trait]
impl NotificationExt for DBClient {
    async fn insert_notification(
        &self,
        user_id: Uuid,
        title: String,
        message: String,
        notification_type: String,
        action_link: Option<serde_json::Value>,
    ) -> Result<Notification, Error> {
        sqlx::query_as::<_, Notification>(&format!(
            r#"
            INSERT INTO notifications (user_id, title, message, notification_type, action_link)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            NOTIFICATION_COLUMNS
        ))
        .bind(user_id)
        .bind(title)
        .bind(message)
        .bind(notification_type)
        .bind(action_link)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_visible_notifications(&self, user_id: Uuid) -> Result<Vec<Notification>, Error> {
        sqlx::query_as::<_, Notification>(&format!(
            r#"
            SELECT {}
            FROM notifications
            WHERE user_id = $1
              AND (read = FALSE OR read_at > NOW() - ($2 || ' days')::INTERVAL)
            ORDER BY created_at DESC
            "#,
            NOTIFICATION_COLUMNS
        ))
        .bind(user_id)
        .bind(READ_RETENTION_DAYS.to_string())
        .fetch_all(&self.pool)
        .await
    }

    async fn count_unread(&self, user_id: Uuid) -> Result<i64, Error> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    async fn mark_notification_read(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
    ) -> Result<Notification, Error> {
        sqlx::query_as::<_, Notification>(&format!(
            r#"
            UPDATE notifications
            SET read = TRUE, read_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            NOTIFICATION_COLUMNS
        ))
        .bind(notification_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, Error> {
        let result = sqlx::query(
            "UPDATE notifications SET read = TRUE, read_at = NOW() WHERE user_id = $1 AND read = FALSE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn cleanup_old_notifications(&self) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM notifications
            WHERE read = TRUE AND read_at < NOW() - ($1 || ' days')::INTERVAL
            "#,
        )
        .bind(READ_RETENTION_DAYS.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
