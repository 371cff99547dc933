use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::supportmodel::SupportMessage;

const SUPPORT_COLUMNS: &str =
    "id, user_id, subject, message, status, admin_reply, created_at, replied_at";

#[async_trait]
pub trait SupportExt {
    async fn create_support_message(
        &self,
        user_id: Uuid,
        subject: String,
        message: String,
    ) -> Result<SupportMessage, Error>;

    async fn get_support_messages_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<SupportMessage>, Error>;

    async fn get_open_support_messages(&self) -> Result<Vec<SupportMessage>, Error>;

    async fn reply_support_message(
        &self,
        message_id: Uuid,
        reply: String,
    ) -> Result<SupportMessage, Error>;
}

#[async_trait]
impl SupportExt for DBClient {
    async fn create_support_message(
        &self,
        user_id: Uuid,
        subject: String,
        message: String,
    ) -> Result<SupportMessage, Error> {
        sqlx::query_as::<_, SupportMessage>(&format!(
            r#"
            INSERT INTO support_messages (user_id, subject, message)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            SUPPORT_COLUMNS
        ))
        .bind(user_id)
        .bind(subject)
        .bind(message)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_support_messages_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<SupportMessage>, Error> {
        sqlx::query_as::<_, SupportMessage>(&format!(
            "SELECT {} FROM support_messages WHERE user_id = $1 ORDER BY created_at DESC",
            SUPPORT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_open_support_messages(&self) -> Result<Vec<SupportMessage>, Error> {
        sqlx::query_as::<_, SupportMessage>(&format!(
            "SELECT {} FROM support_messages WHERE status = 'open' ORDER BY created_at ASC",
            SUPPORT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn reply_support_message(
        &self,
        message_id: Uuid,
        reply: String,
    ) -> Result<SupportMessage, Error> {
        sqlx::query_as::<_, SupportMessage>(&format!(
            r#"
            UPDATE support_messages
            SET status = 'answered', admin_reply = $2, replied_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            SUPPORT_COLUMNS
        ))
        .bind(message_id)
        .bind(reply)
        .fetch_one(&self.pool)
        .await
    }
}
