use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateAppealDto {
    pub job_id: Uuid,

    #[validate(length(
        min = 10,
        max = 2000,
        message = "Appeal text must be between 10 and 2000 characters"
    ))]
    pub appeal_text: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ResolveAppealDto {
    pub approve: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PunishJobDto {
    /// Days of suspension for both parties; omit for an indefinite ban.
    pub ban_days: Option<i64>,
}
