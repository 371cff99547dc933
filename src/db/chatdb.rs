use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::chatmodel::ChatMessage;

#[async_trait]
pub trait ChatExt {
    async fn insert_message(
        &self,
        job_id: Uuid,
        sender_id: Uuid,
        content: Option<String>,
        image_url: Option<String>,
        audio_url: Option<String>,
    ) -> Result<ChatMessage, Error>;

    async fn get_messages_for_job(&self, job_id: Uuid) -> Result<Vec<ChatMessage>, Error>;
}

#[async_trait]
impl ChatExt for DBClient {
    async fn insert_message(
        &self,
        job_id: Uuid,
        sender_id: Uuid,
        content: Option<String>,
        image_url: Option<String>,
        audio_url: Option<String>,
    ) -> Result<ChatMessage, Error> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            INSERT INTO messages (job_id, sender_id, content, image_url, audio_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, job_id, sender_id, content, image_url, audio_url, created_at
            "#,
        )
        .bind(job_id)
        .bind(sender_id)
        .bind(content)
        .bind(image_url)
        .bind(audio_url)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_messages_for_job(&self, job_id: Uuid) -> Result<Vec<ChatMessage>, Error> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, job_id, sender_id, content, image_url, audio_url, created_at
            FROM messages
            WHERE job_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
    }
}
