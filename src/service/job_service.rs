use std::sync::Arc;

use chrono::{Days, Utc};
use serde::Serialize;
use sqlx::types::BigDecimal;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, jobdb::JobExt, userdb::UserExt},
    dtos::jobdtos::{CancelJobDto, ConfirmJobDto, CreateJobDto, FinishJobDto},
    models::{
        jobmodel::{AuditData, Job, JobStatus},
        usermodel::Profile,
    },
    service::{
        error::ServiceError,
        notification_service::NotificationService,
        points_service::{
            self, audit_reasons, worker_award, AuditContext, WorkerAwardContext,
        },
    },
};

/// The only component with non-trivial branching: creates, transitions and
/// finalizes jobs, delegating point decisions to the evaluator.
#[derive(Debug, Clone)]
pub struct JobService {
    db_client: Arc<DBClient>,
    notification_service: Arc<NotificationService>,
}

impl JobService {
    pub fn new(db_client: Arc<DBClient>, notification_service: Arc<NotificationService>) -> Self {
        Self {
            db_client,
            notification_service,
        }
    }

    pub async fn post_job(
        &self,
        client: &Profile,
        job_data: CreateJobDto,
    ) -> Result<Job, ServiceError> {
        let now = Utc::now();
        if client.is_banned(now) {
            return Err(ServiceError::UserBanned(client.id));
        }

        let price = BigDecimal::try_from(job_data.price)
            .map_err(|_| ServiceError::Validation("Invalid price".to_string()))?;

        let category_name = job_data
            .category
            .resolve_name(job_data.category_suggestion.as_deref());

        let job = self
            .db_client
            .create_job(
                client.id,
                job_data.title,
                job_data.description,
                price,
                job_data.estimated_hours,
                category_name.clone(),
            )
            .await?;

        // Fan out to workers in the client's city whose specialty matches;
        // suggested categories reach everyone.
        let workers = self
            .db_client
            .get_eligible_workers(
                &client.city,
                &category_name,
                job_data.category.is_unrestricted(),
            )
            .await?;

        self.notification_service.notify_new_job(&workers, &job).await?;

        Ok(job)
    }

    pub async fn accept_job(&self, worker: &Profile, job_id: Uuid) -> Result<Job, ServiceError> {
        let now = Utc::now();
        if worker.is_banned(now) {
            return Err(ServiceError::UserBanned(worker.id));
        }

        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if job.client_id == worker.id {
            return Err(ServiceError::Validation(
                "You cannot accept your own job".to_string(),
            ));
        }

        if job.status != JobStatus::Pending {
            return Err(ServiceError::InvalidJobStatus(job_id, job.status));
        }

        // One active job per worker. Pre-check query; the status guard on
        // the UPDATE still decides a lost race over the same job.
        let active = self.db_client.count_active_jobs_for_worker(worker.id).await?;
        if active > 0 {
            return Err(ServiceError::WorkerBusy(worker.id));
        }

        let accepted = match self.db_client.accept_job(job_id, worker.id).await {
            Ok(job) => job,
            Err(sqlx::Error::RowNotFound) => return Err(ServiceError::JobTaken(job_id)),
            Err(e) => return Err(e.into()),
        };

        self.notification_service.notify_job_accepted(&accepted).await?;

        Ok(accepted)
    }

    pub async fn finish_job(
        &self,
        worker: &Profile,
        job_id: Uuid,
        finish_data: FinishJobDto,
    ) -> Result<Job, ServiceError> {
        let now = Utc::now();
        if worker.is_banned(now) {
            return Err(ServiceError::UserBanned(worker.id));
        }

        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if job.worker_id != Some(worker.id) {
            return Err(ServiceError::UnauthorizedJobAccess(worker.id, job_id));
        }

        if job.status != JobStatus::InProgress {
            return Err(ServiceError::InvalidJobStatus(job_id, job.status));
        }

        let evidence_photo = finish_data.evidence_photo.trim().to_string();
        if evidence_photo.is_empty() {
            return Err(ServiceError::EvidenceRequired);
        }

        let accepted_at = job
            .accepted_at
            .ok_or_else(|| ServiceError::Validation("Job has no acceptance time".to_string()))?;

        let pair_today = self
            .db_client
            .pair_jobs_completed_today(job.client_id, worker.id)
            .await?;

        let yesterday = now
            .date_naive()
            .checked_sub_days(Days::new(1))
            .ok_or_else(|| ServiceError::Validation("Invalid date".to_string()))?;
        let pair_yesterday = self
            .db_client
            .pair_had_job_on(job.client_id, worker.id, yesterday, job.id)
            .await?;

        let reasons = audit_reasons(&AuditContext {
            accepted_at,
            finished_at: now,
            estimated_hours: job.estimated_hours,
            pair_jobs_completed_today: pair_today,
            pair_had_job_yesterday: pair_yesterday,
        });

        let is_audited = !reasons.is_empty();
        let audit_data = if is_audited {
            let worker_answer = finish_data.worker_answer.unwrap_or_default();
            let client_answer = finish_data.client_answer.unwrap_or_default();
            if worker_answer.trim().is_empty() || client_answer.trim().is_empty() {
                return Err(ServiceError::AuditAnswersRequired);
            }
            Some(AuditData {
                reasons,
                worker_answer,
                client_answer,
                flagged_at: now,
            })
        } else {
            None
        };

        let updated = self
            .db_client
            .submit_for_verification(job_id, evidence_photo, is_audited, audit_data)
            .await?;

        if is_audited {
            // Red list: both parties flagged until an admin rules.
            self.db_client.set_suspicious_flag(updated.client_id, true).await?;
            self.db_client.set_suspicious_flag(worker.id, true).await?;
            self.notification_service.notify_audit_flagged(&updated).await?;
        }

        self.notification_service.notify_job_finished(&updated).await?;

        Ok(updated)
    }

    pub async fn confirm_and_rate(
        &self,
        client: &Profile,
        job_id: Uuid,
        confirm_data: ConfirmJobDto,
    ) -> Result<JobCompletionResult, ServiceError> {
        if client.is_banned(Utc::now()) {
            return Err(ServiceError::UserBanned(client.id));
        }

        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if job.client_id != client.id {
            return Err(ServiceError::UnauthorizedJobAccess(client.id, job_id));
        }

        if job.status != JobStatus::WaitingVerification {
            return Err(ServiceError::InvalidJobStatus(job_id, job.status));
        }

        let comment = confirm_data.comment.trim().to_string();
        if comment.is_empty() {
            return Err(ServiceError::Validation(
                "A rating comment is required".to_string(),
            ));
        }

        let worker_id = job
            .worker_id
            .ok_or_else(|| ServiceError::Validation("Job has no worker".to_string()))?;

        let points_today = self.db_client.worker_points_today(worker_id).await? as i32;
        let pair_today = self
            .db_client
            .pair_jobs_completed_today(client.id, worker_id)
            .await?;

        let award = worker_award(&WorkerAwardContext {
            estimated_hours: job.estimated_hours,
            points_earned_today: points_today,
            pair_jobs_completed_today: pair_today,
            is_audited: job.is_audited,
        });

        // points_awarded is written exactly once here; only an admin verdict
        // may change it afterwards.
        let completed = self
            .db_client
            .complete_job(
                job_id,
                confirm_data.rating,
                comment,
                confirm_data.duration_hours,
                award,
            )
            .await?;

        if award > 0 {
            self.db_client.increment_points(worker_id, award).await?;
            self.db_client.refresh_level(worker_id).await?;
        }

        self.db_client
            .increment_points(client.id, points_service::CLIENT_COMPLETION_POINTS)
            .await?;

        self.notification_service
            .notify_job_completed(worker_id, &completed, award)
            .await?;

        Ok(JobCompletionResult {
            job: completed,
            worker_points: award,
            client_points: points_service::CLIENT_COMPLETION_POINTS,
        })
    }

    pub async fn cancel_job(
        &self,
        caller: &Profile,
        job_id: Uuid,
        cancel_data: CancelJobDto,
    ) -> Result<Job, ServiceError> {
        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        let is_party = job.client_id == caller.id || job.worker_id == Some(caller.id);
        if !is_party {
            return Err(ServiceError::UnauthorizedJobAccess(caller.id, job_id));
        }

        if !job.status.can_transition_to(JobStatus::Cancelled) {
            return Err(ServiceError::InvalidJobStatus(job_id, job.status));
        }

        let reason = cancel_data.reason.trim().to_string();
        if reason.is_empty() {
            return Err(ServiceError::Validation(
                "A cancellation reason is required".to_string(),
            ));
        }

        let cancelled = self.db_client.cancel_job(job_id, reason.clone()).await?;

        // Notify whichever party did not cancel; a pending job may not have
        // a worker yet.
        let counterpart = if caller.id == cancelled.client_id {
            cancelled.worker_id
        } else {
            Some(cancelled.client_id)
        };

        if let Some(counterpart_id) = counterpart {
            self.notification_service
                .notify_job_cancelled(counterpart_id, &cancelled, &reason)
                .await?;
        }

        Ok(cancelled)
    }

    pub async fn jobs_for_client(&self, client_id: Uuid) -> Result<Vec<Job>, ServiceError> {
        Ok(self.db_client.get_jobs_by_client(client_id).await?)
    }

    pub async fn jobs_for_worker(&self, worker_id: Uuid) -> Result<Vec<Job>, ServiceError> {
        Ok(self.db_client.get_jobs_by_worker(worker_id).await?)
    }

    pub async fn open_jobs_for_worker(&self, worker: &Profile) -> Result<Vec<Job>, ServiceError> {
        let jobs = self.db_client.get_open_jobs_in_city(&worker.city).await?;

        // Same filter the posting fan-out uses: specialty match, with
        // suggested categories visible to everyone.
        let specialty = worker.specialty.as_deref().unwrap_or("").to_lowercase();
        Ok(jobs
            .into_iter()
            .filter(|job| {
                job.category_name.starts_with("Sugestão:")
                    || job.category_name == "Outros"
                    || (!specialty.is_empty()
                        && specialty.contains(&job.category_name.to_lowercase()))
            })
            .collect())
    }

    pub async fn get_job(&self, job_id: Uuid) -> Result<Job, ServiceError> {
        self.db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))
    }
}

#[derive(Debug, Serialize)]
pub struct JobCompletionResult {
    pub job: Job,
    pub worker_points: i32,
    pub client_points: i32,
}
