use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::types::BigDecimal;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use super::userdb::PROFILE_COLUMNS;
use crate::models::jobmodel::{AdminVerdict, AuditData, Job, WorkerPortfolio};
use crate::models::usermodel::Profile;

const JOB_COLUMNS: &str = r#"
    id, title, description, client_id, worker_id, status, price,
    estimated_hours, category_name, evidence_photo, accepted_at, completed_at,
    points_awarded, is_audited, audit_data, admin_verdict, cancel_reason,
    rating, rating_comment, duration_hours, created_at, updated_at
"#;

#[async_trait]
pub trait JobExt {
    async fn create_job(
        &self,
        client_id: Uuid,
        title: String,
        description: String,
        price: BigDecimal,
        estimated_hours: i32,
        category_name: String,
    ) -> Result<Job, Error>;

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, Error>;

    async fn get_jobs_by_client(&self, client_id: Uuid) -> Result<Vec<Job>, Error>;

    async fn get_jobs_by_worker(&self, worker_id: Uuid) -> Result<Vec<Job>, Error>;

    /// Pending jobs posted by clients in the given city, newest first.
    async fn get_open_jobs_in_city(&self, city: &str) -> Result<Vec<Job>, Error>;

    /// Jobs held by the worker in `in_progress`/`waiting_verification`.
    async fn count_active_jobs_for_worker(&self, worker_id: Uuid) -> Result<i64, Error>;

    /// pending → in_progress with the worker bound; the status guard in the
    /// WHERE clause makes a lost race surface as RowNotFound.
    async fn accept_job(&self, job_id: Uuid, worker_id: Uuid) -> Result<Job, Error>;

    /// in_progress → waiting_verification with the evidence photo and any
    /// audit verdict data attached.
    async fn submit_for_verification(
        &self,
        job_id: Uuid,
        evidence_photo: String,
        is_audited: bool,
        audit_data: Option<AuditData>,
    ) -> Result<Job, Error>;

    /// waiting_verification → completed. Stamps completed_at, stores the
    /// rating, freezes points_awarded and drops the evidence photo.
    async fn complete_job(
        &self,
        job_id: Uuid,
        rating: i32,
        rating_comment: String,
        duration_hours: i32,
        points_awarded: i32,
    ) -> Result<Job, Error>;

    async fn cancel_job(&self, job_id: Uuid, reason: String) -> Result<Job, Error>;

    /// Audited jobs still waiting for an admin verdict.
    async fn get_red_list(&self) -> Result<Vec<Job>, Error>;

    async fn set_admin_verdict(
        &self,
        job_id: Uuid,
        verdict: AdminVerdict,
        points_awarded: i32,
    ) -> Result<Job, Error>;

    /// Points already credited to the worker for jobs completed today.
    async fn worker_points_today(&self, worker_id: Uuid) -> Result<i64, Error>;

    /// Completed jobs for this client+worker pair today.
    async fn pair_jobs_completed_today(
        &self,
        client_id: Uuid,
        worker_id: Uuid,
    ) -> Result<i64, Error>;

    /// Whether the pair had any other non-cancelled job touching the given
    /// day. The job under evaluation is excluded so a multi-day job does not
    /// count as its own prior history.
    async fn pair_had_job_on(
        &self,
        client_id: Uuid,
        worker_id: Uuid,
        day: NaiveDate,
        exclude_job_id: Uuid,
    ) -> Result<bool, Error>;

    /// Workers in the client's city whose specialty matches the category, or
    /// any worker when the category is unrestricted.
    async fn get_eligible_workers(
        &self,
        city: &str,
        category_name: &str,
        unrestricted: bool,
    ) -> Result<Vec<Profile>, Error>;

    /// Distinct `Sugestão: <text>` category names collected from posted jobs.
    async fn list_category_suggestions(&self) -> Result<Vec<String>, Error>;

    async fn add_portfolio_item(
        &self,
        worker_id: Uuid,
        title: String,
        description: String,
        image_url: String,
    ) -> Result<WorkerPortfolio, Error>;

    async fn get_worker_portfolio(&self, worker_id: Uuid) -> Result<Vec<WorkerPortfolio>, Error>;

    async fn delete_portfolio_item(&self, item_id: Uuid, worker_id: Uuid) -> Result<u64, Error>;
}

#[async_trait]
impl JobExt for DBClient {
    async fn create_job(
        &self,
        client_id: Uuid,
        title: String,
        description: String,
        price: BigDecimal,
        estimated_hours: i32,
        category_name: String,
    ) -> Result<Job, Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs (client_id, title, description, price, estimated_hours, category_name)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(client_id)
        .bind(title)
        .bind(description)
        .bind(price)
        .bind(estimated_hours)
        .bind(category_name)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, Error> {
        sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs WHERE id = $1",
            JOB_COLUMNS
        ))
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_jobs_by_client(&self, client_id: Uuid) -> Result<Vec<Job>, Error> {
        sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs WHERE client_id = $1 ORDER BY created_at DESC",
            JOB_COLUMNS
        ))
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_jobs_by_worker(&self, worker_id: Uuid) -> Result<Vec<Job>, Error> {
        sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs WHERE worker_id = $1 ORDER BY created_at DESC",
            JOB_COLUMNS
        ))
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_open_jobs_in_city(&self, city: &str) -> Result<Vec<Job>, Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            SELECT {}
            FROM jobs
            WHERE status = 'pending'
              AND EXISTS (
                  SELECT 1 FROM profiles p
                  WHERE p.id = jobs.client_id AND p.city ILIKE $1
              )
            ORDER BY created_at DESC
            "#,
            JOB_COLUMNS
        ))
        .bind(city)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_active_jobs_for_worker(&self, worker_id: Uuid) -> Result<i64, Error> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM jobs
            WHERE worker_id = $1 AND status IN ('in_progress', 'waiting_verification')
            "#,
        )
        .bind(worker_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    async fn accept_job(&self, job_id: Uuid, worker_id: Uuid) -> Result<Job, Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET worker_id = $2, status = 'in_progress', accepted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND status = 'pending' AND worker_id IS NULL
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(job_id)
        .bind(worker_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn submit_for_verification(
        &self,
        job_id: Uuid,
        evidence_photo: String,
        is_audited: bool,
        audit_data: Option<AuditData>,
    ) -> Result<Job, Error> {
        let audit_json = audit_data.map(sqlx::types::Json);

        sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET status = 'waiting_verification',
                evidence_photo = $2,
                is_audited = $3,
                audit_data = $4,
                updated_at = NOW()
            WHERE id = $1 AND status = 'in_progress'
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(job_id)
        .bind(evidence_photo)
        .bind(is_audited)
        .bind(audit_json)
        .fetch_one(&self.pool)
        .await
    }

    async fn complete_job(
        &self,
        job_id: Uuid,
        rating: i32,
        rating_comment: String,
        duration_hours: i32,
        points_awarded: i32,
    ) -> Result<Job, Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET status = 'completed',
                completed_at = NOW(),
                rating = $2,
                rating_comment = $3,
                duration_hours = $4,
                points_awarded = $5,
                evidence_photo = NULL,
                updated_at = NOW()
            WHERE id = $1 AND status = 'waiting_verification'
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(job_id)
        .bind(rating)
        .bind(rating_comment)
        .bind(duration_hours)
        .bind(points_awarded)
        .fetch_one(&self.pool)
        .await
    }

    async fn cancel_job(&self, job_id: Uuid, reason: String) -> Result<Job, Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET status = 'cancelled', cancel_reason = $2, updated_at = NOW()
            WHERE id = $1 AND status IN ('pending', 'in_progress')
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(job_id)
        .bind(reason)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_red_list(&self) -> Result<Vec<Job>, Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            SELECT {}
            FROM jobs
            WHERE is_audited = TRUE AND admin_verdict IS NULL
            ORDER BY updated_at ASC
            "#,
            JOB_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn set_admin_verdict(
        &self,
        job_id: Uuid,
        verdict: AdminVerdict,
        points_awarded: i32,
    ) -> Result<Job, Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET admin_verdict = $2, points_awarded = $3, updated_at = NOW()
            WHERE id = $1 AND is_audited = TRUE
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(job_id)
        .bind(verdict)
        .bind(points_awarded)
        .fetch_one(&self.pool)
        .await
    }

    async fn worker_points_today(&self, worker_id: Uuid) -> Result<i64, Error> {
        let total: (Option<i64>,) = sqlx::query_as(
            r#"
            SELECT SUM(points_awarded)::BIGINT FROM jobs
            WHERE worker_id = $1
              AND status = 'completed'
              AND completed_at::DATE = CURRENT_DATE
            "#,
        )
        .bind(worker_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total.0.unwrap_or(0))
    }

    async fn pair_jobs_completed_today(
        &self,
        client_id: Uuid,
        worker_id: Uuid,
    ) -> Result<i64, Error> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM jobs
            WHERE client_id = $1
              AND worker_id = $2
              AND status = 'completed'
              AND completed_at::DATE = CURRENT_DATE
            "#,
        )
        .bind(client_id)
        .bind(worker_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    async fn pair_had_job_on(
        &self,
        client_id: Uuid,
        worker_id: Uuid,
        day: NaiveDate,
        exclude_job_id: Uuid,
    ) -> Result<bool, Error> {
        let exists: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM jobs
                WHERE client_id = $1
                  AND worker_id = $2
                  AND id <> $4
                  AND status <> 'cancelled'
                  AND (accepted_at::DATE = $3 OR completed_at::DATE = $3)
            )
            "#,
        )
        .bind(client_id)
        .bind(worker_id)
        .bind(day)
        .bind(exclude_job_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.0)
    }

    async fn get_eligible_workers(
        &self,
        city: &str,
        category_name: &str,
        unrestricted: bool,
    ) -> Result<Vec<Profile>, Error> {
        sqlx::query_as::<_, Profile>(&format!(
            r#"
            SELECT {}
            FROM profiles
            WHERE active = TRUE
              AND 'worker' = ANY(allowed_roles::TEXT[])
              AND city ILIKE $1
              AND ($3 OR specialty ILIKE '%' || $2 || '%')
            "#,
            PROFILE_COLUMNS
        ))
        .bind(city)
        .bind(category_name)
        .bind(unrestricted)
        .fetch_all(&self.pool)
        .await
    }

    async fn list_category_suggestions(&self) -> Result<Vec<String>, Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT category_name FROM jobs
            WHERE category_name LIKE 'Sugestão: %'
            ORDER BY category_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn add_portfolio_item(
        &self,
        worker_id: Uuid,
        title: String,
        description: String,
        image_url: String,
    ) -> Result<WorkerPortfolio, Error> {
        sqlx::query_as::<_, WorkerPortfolio>(
            r#"
            INSERT INTO worker_portfolio (worker_id, title, description, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, worker_id, title, description, image_url, created_at
            "#,
        )
        .bind(worker_id)
        .bind(title)
        .bind(description)
        .bind(image_url)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_worker_portfolio(&self, worker_id: Uuid) -> Result<Vec<WorkerPortfolio>, Error> {
        sqlx::query_as::<_, WorkerPortfolio>(
            r#"
            SELECT id, worker_id, title, description, image_url, created_at
            FROM worker_portfolio
            WHERE worker_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn delete_portfolio_item(&self, item_id: Uuid, worker_id: Uuid) -> Result<u64, Error> {
        let result = sqlx::query(
            "DELETE FROM worker_portfolio WHERE id = $1 AND worker_id = $2",
        )
        .bind(item_id)
        .bind(worker_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
