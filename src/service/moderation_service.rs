use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::{appealdb::AppealExt, db::DBClient, jobdb::JobExt, userdb::UserExt},
    models::{
        appealmodel::{AppealStatus, PunishmentAppeal},
        jobmodel::{AdminVerdict, Job},
        usermodel::Profile,
    },
    service::{
        error::ServiceError,
        notification_service::NotificationService,
        points_service::{worker_award, WorkerAwardContext, DEFAULT_BAN_DAYS},
    },
};

/// Manual override surface for the red list, bans and appeals. The
/// evaluator only detects; every punishment decision lands here.
#[derive(Debug, Clone)]
pub struct ModerationService {
    db_client: Arc<DBClient>,
    notification_service: Arc<NotificationService>,
}

impl ModerationService {
    pub fn new(db_client: Arc<DBClient>, notification_service: Arc<NotificationService>) -> Self {
        Self {
            db_client,
            notification_service,
        }
    }

    pub async fn red_list(&self) -> Result<Vec<Job>, ServiceError> {
        Ok(self.db_client.get_red_list().await?)
    }

    /// Absolve an audited job: clear both flags and retroactively award the
    /// points the audit withheld, re-running the evaluator with the daily
    /// rules as they stand at resolution time.
    pub async fn absolve(&self, job_id: Uuid) -> Result<AuditResolution, ServiceError> {
        let job = self.pending_audited_job(job_id).await?;
        let worker_id = job
            .worker_id
            .ok_or_else(|| ServiceError::Validation("Audited job has no worker".to_string()))?;

        let points_today = self.db_client.worker_points_today(worker_id).await? as i32;
        let award = worker_award(&WorkerAwardContext {
            estimated_hours: job.estimated_hours,
            points_earned_today: points_today,
            // the withheld job itself no longer counts against the pair
            pair_jobs_completed_today: 0,
            is_audited: false,
        });

        let updated = self
            .db_client
            .set_admin_verdict(job_id, AdminVerdict::Absolved, award)
            .await?;

        if award > 0 {
            self.db_client.increment_points(worker_id, award).await?;
            self.db_client.refresh_level(worker_id).await?;
        }

        self.db_client.set_suspicious_flag(updated.client_id, false).await?;
        self.db_client.set_suspicious_flag(worker_id, false).await?;

        self.notification_service
            .notify_verdict(&updated, AdminVerdict::Absolved)
            .await?;

        Ok(AuditResolution {
            job: updated,
            verdict: AdminVerdict::Absolved,
            points_restored: award,
        })
    }

    /// Punish both parties of an audited job: 7-day ban by default, or
    /// indefinite when no duration is given. The worker drops to bronze
    /// with the prior level remembered for a successful appeal.
    pub async fn punish(
        &self,
        job_id: Uuid,
        ban_days: Option<i64>,
    ) -> Result<AuditResolution, ServiceError> {
        let job = self.pending_audited_job(job_id).await?;
        let worker_id = job
            .worker_id
            .ok_or_else(|| ServiceError::Validation("Audited job has no worker".to_string()))?;

        let updated = self
            .db_client
            .set_admin_verdict(job_id, AdminVerdict::Punished, 0)
            .await?;

        let punishment_until = match ban_days {
            Some(days) if days > 0 => Some(Utc::now() + Duration::days(days)),
            Some(_) => Some(Utc::now() + Duration::days(DEFAULT_BAN_DAYS)),
            None => None, // indefinite
        };

        self.db_client.ban_user(updated.client_id, punishment_until).await?;
        self.db_client.ban_user(worker_id, punishment_until).await?;

        self.notification_service
            .notify_verdict(&updated, AdminVerdict::Punished)
            .await?;

        Ok(AuditResolution {
            job: updated,
            verdict: AdminVerdict::Punished,
            points_restored: 0,
        })
    }

    async fn pending_audited_job(&self, job_id: Uuid) -> Result<Job, ServiceError> {
        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if !job.is_audited {
            return Err(ServiceError::Validation(
                "Job is not flagged for audit".to_string(),
            ));
        }

        if job.admin_verdict.is_some() {
            return Err(ServiceError::Validation(
                "Job audit has already been resolved".to_string(),
            ));
        }

        Ok(job)
    }

    /// A punished party files one appeal per disputed job.
    pub async fn create_appeal(
        &self,
        user: &Profile,
        job_id: Uuid,
        appeal_text: String,
    ) -> Result<PunishmentAppeal, ServiceError> {
        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        let is_party = job.client_id == user.id || job.worker_id == Some(user.id);
        if !is_party {
            return Err(ServiceError::UnauthorizedJobAccess(user.id, job_id));
        }

        if job.admin_verdict != Some(AdminVerdict::Punished) {
            return Err(ServiceError::Validation(
                "Only punished jobs can be appealed".to_string(),
            ));
        }

        if self.db_client.appeal_exists(user.id, job_id).await? {
            return Err(ServiceError::AppealAlreadyFiled);
        }

        let text = appeal_text.trim().to_string();
        if text.is_empty() {
            return Err(ServiceError::Validation(
                "Appeal text is required".to_string(),
            ));
        }

        Ok(self.db_client.create_appeal(user.id, job_id, text).await?)
    }

    pub async fn pending_appeals(&self) -> Result<Vec<PunishmentAppeal>, ServiceError> {
        Ok(self.db_client.get_pending_appeals().await?)
    }

    pub async fn appeals_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PunishmentAppeal>, ServiceError> {
        Ok(self.db_client.get_appeals_by_user(user_id).await?)
    }

    /// Approve: lift the ban and restore the pre-ban level. Reject: the
    /// punishment stands. Either way the appeal is closed for good.
    pub async fn resolve_appeal(
        &self,
        appeal_id: Uuid,
        approve: bool,
    ) -> Result<PunishmentAppeal, ServiceError> {
        let appeal = self
            .db_client
            .get_appeal_by_id(appeal_id)
            .await?
            .ok_or(ServiceError::AppealNotFound(appeal_id))?;

        if appeal.status != AppealStatus::Pending {
            return Err(ServiceError::AppealAlreadyResolved(appeal_id));
        }

        let status = if approve {
            AppealStatus::Approved
        } else {
            AppealStatus::Rejected
        };

        let resolved = match self.db_client.resolve_appeal(appeal_id, status).await {
            Ok(appeal) => appeal,
            Err(sqlx::Error::RowNotFound) => {
                return Err(ServiceError::AppealAlreadyResolved(appeal_id))
            }
            Err(e) => return Err(e.into()),
        };

        if approve {
            self.db_client.unban_user(resolved.user_id).await?;
        }

        self.notification_service
            .notify_appeal_resolved(resolved.user_id, resolved.job_id, status)
            .await?;

        Ok(resolved)
    }

    pub async fn ban_user(
        &self,
        user_id: Uuid,
        ban_days: Option<i64>,
    ) -> Result<Profile, ServiceError> {
        let punishment_until = ban_days.map(|days| Utc::now() + Duration::days(days));
        Ok(self.db_client.ban_user(user_id, punishment_until).await?)
    }

    pub async fn unban_user(&self, user_id: Uuid) -> Result<Profile, ServiceError> {
        Ok(self.db_client.unban_user(user_id).await?)
    }

    pub async fn suspicious_users(&self) -> Result<Vec<Profile>, ServiceError> {
        Ok(self.db_client.list_suspicious_users().await?)
    }
}

#[derive(Debug, Serialize)]
pub struct AuditResolution {
    pub job: Job,
    pub verdict: AdminVerdict,
    pub points_restored: i32,
}
