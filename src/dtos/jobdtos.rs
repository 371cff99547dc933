use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::jobmodel::ServiceCategory;

// Job DTOs
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateJobDto {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,

    #[validate(length(
        min = 10,
        max = 2000,
        message = "Description must be between 10 and 2000 characters"
    ))]
    pub description: String,

    pub category: ServiceCategory,

    /// Free-text suggestion, only honoured when category is "Outros".
    #[validate(length(max = 100, message = "Suggestion must be at most 100 characters"))]
    pub category_suggestion: Option<String>,

    #[validate(range(min = 1.0, message = "Price must be positive"))]
    pub price: f64,

    #[validate(range(min = 1, max = 100, message = "Estimated hours must be between 1 and 100"))]
    pub estimated_hours: i32,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct FinishJobDto {
    #[validate(length(min = 1, message = "Evidence photo is required"))]
    pub evidence_photo: String,

    // Required only when the anti-fraud triggers fire; the service enforces
    // their presence.
    #[validate(length(max = 1000, message = "Answer must be at most 1000 characters"))]
    pub worker_answer: Option<String>,

    #[validate(length(max = 1000, message = "Answer must be at most 1000 characters"))]
    pub client_answer: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct ConfirmJobDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(min = 1, max = 1000, message = "Comment is required"))]
    pub comment: String,

    #[validate(range(min = 1, max = 100, message = "Duration must be between 1 and 100 hours"))]
    pub duration_hours: i32,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CancelJobDto {
    #[validate(length(min = 1, max = 500, message = "Reason is required"))]
    pub reason: String,
}

// Portfolio DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreatePortfolioDto {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,

    #[validate(length(
        min = 10,
        max = 500,
        message = "Description must be between 10 and 500 characters"
    ))]
    pub description: String,

    #[validate(url(message = "Invalid image URL"))]
    pub image_url: String,
}

// Response wrappers
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data: Some(data),
        }
    }
}
