use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, notificationdb::NotificationExt},
    models::{
        appealmodel::AppealStatus,
        jobmodel::{AdminVerdict, Job},
        usermodel::Profile,
    },
    service::error::ServiceError,
};

/// Thin relay: every state change inserts a row for the counterpart. There
/// is no delivery guarantee beyond the insert itself; clients poll.
#[derive(Debug, Clone)]
pub struct NotificationService {
    db_client: Arc<DBClient>,
}

impl NotificationService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    async fn store(
        &self,
        user_id: Uuid,
        title: &str,
        message: String,
        notification_type: &str,
        action_link: serde_json::Value,
    ) -> Result<(), ServiceError> {
        self.db_client
            .insert_notification(
                user_id,
                title.to_string(),
                message,
                notification_type.to_string(),
                Some(action_link),
            )
            .await
            .map_err(|e| ServiceError::Notification(e.to_string()))?;

        Ok(())
    }

    /// Fan out a new pending job to every eligible worker.
    pub async fn notify_new_job(
        &self,
        workers: &[Profile],
        job: &Job,
    ) -> Result<(), ServiceError> {
        tracing::info!(
            "New job notification: '{}' ({}) to {} workers",
            job.title,
            job.category_name,
            workers.len()
        );

        for worker in workers {
            self.store(
                worker.id,
                "Novo serviço disponível",
                format!("{} — {}", job.title, job.category_name),
                "new_job",
                json!({ "job_id": job.id }),
            )
            .await?;
        }

        Ok(())
    }

    pub async fn notify_job_accepted(&self, job: &Job) -> Result<(), ServiceError> {
        self.store(
            job.client_id,
            "Serviço aceito",
            format!("Um profissional aceitou o serviço '{}'", job.title),
            "job_accepted",
            json!({ "job_id": job.id }),
        )
        .await
    }

    pub async fn notify_job_finished(&self, job: &Job) -> Result<(), ServiceError> {
        self.store(
            job.client_id,
            "Serviço aguardando confirmação",
            format!(
                "O profissional enviou a foto de conclusão de '{}'. Confirme e avalie.",
                job.title
            ),
            "job_finished",
            json!({ "job_id": job.id }),
        )
        .await
    }

    pub async fn notify_job_completed(
        &self,
        worker_id: Uuid,
        job: &Job,
        points_awarded: i32,
    ) -> Result<(), ServiceError> {
        self.store(
            worker_id,
            "Serviço concluído",
            format!(
                "'{}' foi confirmado pelo cliente. Pontos recebidos: {}",
                job.title, points_awarded
            ),
            "job_completed",
            json!({ "job_id": job.id, "points": points_awarded }),
        )
        .await
    }

    pub async fn notify_job_cancelled(
        &self,
        counterpart_id: Uuid,
        job: &Job,
        reason: &str,
    ) -> Result<(), ServiceError> {
        self.store(
            counterpart_id,
            "Serviço cancelado",
            format!("'{}' foi cancelado. Motivo: {}", job.title, reason),
            "job_cancelled",
            json!({ "job_id": job.id }),
        )
        .await
    }

    /// Both parties of an audited job learn it entered manual review.
    pub async fn notify_audit_flagged(&self, job: &Job) -> Result<(), ServiceError> {
        tracing::warn!("Job {} flagged for audit", job.id);

        let mut targets = vec![job.client_id];
        if let Some(worker_id) = job.worker_id {
            targets.push(worker_id);
        }

        for user_id in targets {
            self.store(
                user_id,
                "Serviço em auditoria",
                format!(
                    "'{}' foi marcado para revisão manual. A pontuação ficará retida até a decisão.",
                    job.title
                ),
                "audit_flagged",
                json!({ "job_id": job.id }),
            )
            .await?;
        }

        Ok(())
    }

    pub async fn notify_verdict(
        &self,
        job: &Job,
        verdict: AdminVerdict,
    ) -> Result<(), ServiceError> {
        let (title, body) = match verdict {
            AdminVerdict::Absolved => (
                "Auditoria encerrada",
                format!("'{}' foi absolvido; pontos liberados.", job.title),
            ),
            AdminVerdict::Punished => (
                "Auditoria encerrada",
                format!("'{}' resultou em punição. Você pode recorrer.", job.title),
            ),
        };

        let mut targets = vec![job.client_id];
        if let Some(worker_id) = job.worker_id {
            targets.push(worker_id);
        }

        for user_id in targets {
            self.store(
                user_id,
                title,
                body.clone(),
                "audit_verdict",
                json!({ "job_id": job.id, "verdict": verdict }),
            )
            .await?;
        }

        Ok(())
    }

    pub async fn notify_appeal_resolved(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        status: AppealStatus,
    ) -> Result<(), ServiceError> {
        let message = match status {
            AppealStatus::Approved => "Seu recurso foi aprovado e a punição removida.",
            AppealStatus::Rejected => "Seu recurso foi analisado e negado.",
            AppealStatus::Pending => return Ok(()),
        };

        self.store(
            user_id,
            "Recurso analisado",
            message.to_string(),
            "appeal_resolved",
            json!({ "job_id": job_id, "status": status }),
        )
        .await
    }
}
