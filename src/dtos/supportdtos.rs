use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateSupportMessageDto {
    #[validate(length(min = 1, max = 150, message = "Subject must be between 1 and 150 characters"))]
    pub subject: String,

    #[validate(length(
        min = 10,
        max = 2000,
        message = "Message must be between 10 and 2000 characters"
    ))]
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct ReplySupportMessageDto {
    #[validate(length(min = 1, max = 2000, message = "Reply must be between 1 and 2000 characters"))]
    pub reply: String,
}
