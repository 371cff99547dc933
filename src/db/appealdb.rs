use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::appealmodel::{AppealStatus, PunishmentAppeal};

const APPEAL_COLUMNS: &str = "id, user_id, job_id, appeal_text, status, created_at, resolved_at";

#[async_trait]
pub trait AppealExt {
    async fn create_appeal(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        appeal_text: String,
    ) -> Result<PunishmentAppeal, Error>;

    async fn get_appeal_by_id(&self, appeal_id: Uuid) -> Result<Option<PunishmentAppeal>, Error>;

    /// Whether this user already filed an appeal for this dispute.
    async fn appeal_exists(&self, user_id: Uuid, job_id: Uuid) -> Result<bool, Error>;

    async fn get_appeals_by_user(&self, user_id: Uuid) -> Result<Vec<PunishmentAppeal>, Error>;

    async fn get_pending_appeals(&self) -> Result<Vec<PunishmentAppeal>, Error>;

    /// Resolve exactly once: the pending guard rejects a second resolution.
    async fn resolve_appeal(
        &self,
        appeal_id: Uuid,
        status: AppealStatus,
    ) -> Result<PunishmentAppeal, Error>;
}

#[async_trait]
impl AppealExt for DBClient {
    async fn create_appeal(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        appeal_text: String,
    ) -> Result<PunishmentAppeal, Error> {
        sqlx::query_as::<_, PunishmentAppeal>(&format!(
            r#"
            INSERT INTO punishment_appeals (user_id, job_id, appeal_text)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            APPEAL_COLUMNS
        ))
        .bind(user_id)
        .bind(job_id)
        .bind(appeal_text)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_appeal_by_id(&self, appeal_id: Uuid) -> Result<Option<PunishmentAppeal>, Error> {
        sqlx::query_as::<_, PunishmentAppeal>(&format!(
            "SELECT {} FROM punishment_appeals WHERE id = $1",
            APPEAL_COLUMNS
        ))
        .bind(appeal_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn appeal_exists(&self, user_id: Uuid, job_id: Uuid) -> Result<bool, Error> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM punishment_appeals WHERE user_id = $1 AND job_id = $2)",
        )
        .bind(user_id)
        .bind(job_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.0)
    }

    async fn get_appeals_by_user(&self, user_id: Uuid) -> Result<Vec<PunishmentAppeal>, Error> {
        sqlx::query_as::<_, PunishmentAppeal>(&format!(
            "SELECT {} FROM punishment_appeals WHERE user_id = $1 ORDER BY created_at DESC",
            APPEAL_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_pending_appeals(&self) -> Result<Vec<PunishmentAppeal>, Error> {
        sqlx::query_as::<_, PunishmentAppeal>(&format!(
            "SELECT {} FROM punishment_appeals WHERE status = 'pending' ORDER BY created_at ASC",
            APPEAL_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn resolve_appeal(
        &self,
        appeal_id: Uuid,
        status: AppealStatus,
    ) -> Result<PunishmentAppeal, Error> {
        sqlx::query_as::<_, PunishmentAppeal>(&format!(
            r#"
            UPDATE punishment_appeals
            SET status = $2, resolved_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {}
            "#,
            APPEAL_COLUMNS
        ))
        .bind(appeal_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }
}
