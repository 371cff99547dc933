use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "service_category", rename_all = "snake_case")]
pub enum ServiceCategory {
    Eletricista,
    Encanador,
    Pintor,
    Pedreiro,
    Marceneiro,
    Jardineiro,
    Diarista,
    Montador,
    Chaveiro,
    Vidraceiro,
    Mudancas,
    Outros,
}

impl ServiceCategory {
    pub fn to_str(&self) -> &str {
        match self {
            ServiceCategory::Eletricista => "Eletricista",
            ServiceCategory::Encanador => "Encanador",
            ServiceCategory::Pintor => "Pintor",
            ServiceCategory::Pedreiro => "Pedreiro",
            ServiceCategory::Marceneiro => "Marceneiro",
            ServiceCategory::Jardineiro => "Jardineiro",
            ServiceCategory::Diarista => "Diarista",
            ServiceCategory::Montador => "Montador",
            ServiceCategory::Chaveiro => "Chaveiro",
            ServiceCategory::Vidraceiro => "Vidraceiro",
            ServiceCategory::Mudancas => "Mudanças",
            ServiceCategory::Outros => "Outros",
        }
    }

    /// Stored category string for a posted job. "Outros" with a free-text
    /// suggestion is stored as `Sugestão: <text>` so admins can collect
    /// suggested categories later.
    pub fn resolve_name(&self, suggestion: Option<&str>) -> String {
        match (self, suggestion) {
            (ServiceCategory::Outros, Some(text)) if !text.trim().is_empty() => {
                format!("Sugestão: {}", text.trim())
            }
            _ => self.to_str().to_string(),
        }
    }

    /// Suggested categories reach every worker regardless of specialty.
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, ServiceCategory::Outros)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "job_status", rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    InProgress,
    WaitingVerification,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Cancelled)
    }

    /// A job counted against the one-active-job-per-worker rule.
    pub fn is_active(&self) -> bool {
        matches!(self, JobStatus::InProgress | JobStatus::WaitingVerification)
    }

    /// Forward-only lifecycle: pending → in_progress → waiting_verification
    /// → completed, with cancellation allowed from the two non-terminal
    /// pre-verification states.
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::Pending, JobStatus::InProgress)
                | (JobStatus::InProgress, JobStatus::WaitingVerification)
                | (JobStatus::WaitingVerification, JobStatus::Completed)
                | (JobStatus::Pending, JobStatus::Cancelled)
                | (JobStatus::InProgress, JobStatus::Cancelled)
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "admin_verdict", rename_all = "snake_case")]
pub enum AdminVerdict {
    Absolved,
    Punished,
}

/// Reasons and answers attached to an audited job, persisted as JSON in
/// `jobs.audit_data`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AuditData {
    pub reasons: Vec<String>,
    pub worker_answer: String,
    pub client_answer: String,
    pub flagged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub client_id: Uuid,
    pub worker_id: Option<Uuid>,
    pub status: JobStatus,
    pub price: BigDecimal,
    pub estimated_hours: i32,
    pub category_name: String,
    pub evidence_photo: Option<String>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub points_awarded: i32,
    pub is_audited: bool,
    pub audit_data: Option<sqlx::types::Json<AuditData>>,
    pub admin_verdict: Option<AdminVerdict>,
    pub cancel_reason: Option<String>,
    pub rating: Option<i32>,
    pub rating_comment: Option<String>,
    // Actual duration reported by the client at confirmation time.
    pub duration_hours: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkerPortfolio {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_moves_forward_only() {
        use JobStatus::*;

        assert!(Pending.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(WaitingVerification));
        assert!(WaitingVerification.can_transition_to(Completed));

        // no backward moves
        assert!(!InProgress.can_transition_to(Pending));
        assert!(!WaitingVerification.can_transition_to(InProgress));
        assert!(!Completed.can_transition_to(WaitingVerification));
    }

    #[test]
    fn cancellation_only_from_non_terminal_pre_verification() {
        use JobStatus::*;

        assert!(Pending.can_transition_to(Cancelled));
        assert!(InProgress.can_transition_to(Cancelled));
        assert!(!WaitingVerification.can_transition_to(Cancelled));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Cancelled));
    }

    #[test]
    fn terminal_states_are_dead_ends() {
        use JobStatus::*;

        for next in [Pending, InProgress, WaitingVerification, Completed, Cancelled] {
            assert!(!Completed.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
        assert!(Completed.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!WaitingVerification.is_terminal());
    }

    #[test]
    fn active_statuses_hold_the_worker_slot() {
        use JobStatus::*;

        assert!(InProgress.is_active());
        assert!(WaitingVerification.is_active());
        assert!(!Pending.is_active());
        assert!(!Completed.is_active());
    }

    #[test]
    fn suggestion_category_round_trip() {
        let name = ServiceCategory::Outros.resolve_name(Some("Afinador de piano"));
        assert_eq!(name, "Sugestão: Afinador de piano");

        // suggestion is ignored for concrete categories
        let name = ServiceCategory::Pintor.resolve_name(Some("whatever"));
        assert_eq!(name, "Pintor");

        // blank suggestion falls back to the plain label
        let name = ServiceCategory::Outros.resolve_name(Some("   "));
        assert_eq!(name, "Outros");
    }
}
