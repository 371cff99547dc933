use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::{error::HttpError, models::jobmodel::JobStatus};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Job {0} not found")]
    JobNotFound(Uuid),

    #[error("Job {0} is not in status {1:?}")]
    InvalidJobStatus(Uuid, JobStatus),

    #[error("User {0} is not authorized to perform this action on job {1}")]
    UnauthorizedJobAccess(Uuid, Uuid),

    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error("User {0} is suspended and cannot perform this action")]
    UserBanned(Uuid),

    #[error("Worker {0} already has an active job")]
    WorkerBusy(Uuid),

    #[error("Job {0} was just taken by another worker")]
    JobTaken(Uuid),

    #[error("An evidence photo is required to finish a job")]
    EvidenceRequired,

    #[error("This job was flagged for audit; both parties must answer the audit questions")]
    AuditAnswersRequired,

    #[error("Appeal {0} not found")]
    AppealNotFound(Uuid),

    #[error("An appeal for this job has already been filed")]
    AppealAlreadyFiled,

    #[error("Appeal {0} has already been resolved")]
    AppealAlreadyResolved(Uuid),

    #[error("Coupon {0} not found or inactive")]
    CouponNotFound(Uuid),

    #[error("Insufficient points: required {required}, available {available}")]
    InsufficientPoints { required: i32, available: i32 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Notification error: {0}")]
    Notification(String),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        HttpError::new(error.to_string(), error.status_code())
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::JobNotFound(_)
            | ServiceError::UserNotFound(_)
            | ServiceError::AppealNotFound(_)
            | ServiceError::CouponNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::InvalidJobStatus(_, _)
            | ServiceError::WorkerBusy(_)
            | ServiceError::EvidenceRequired
            | ServiceError::AuditAnswersRequired
            | ServiceError::AppealAlreadyFiled
            | ServiceError::AppealAlreadyResolved(_)
            | ServiceError::InsufficientPoints { .. }
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::JobTaken(_) => StatusCode::CONFLICT,

            ServiceError::UnauthorizedJobAccess(_, _) => StatusCode::UNAUTHORIZED,

            ServiceError::UserBanned(_) => StatusCode::FORBIDDEN,

            ServiceError::Database(_) | ServiceError::Notification(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lost_acceptance_race_maps_to_conflict() {
        let err = ServiceError::JobTaken(Uuid::nil());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert!(err.to_string().contains("taken by another worker"));
    }

    #[test]
    fn banned_user_maps_to_forbidden() {
        let err = ServiceError::UserBanned(Uuid::nil());
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }
}
