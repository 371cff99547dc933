use std::sync::Arc;

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::supportdb::SupportExt,
    dtos::{jobdtos::ApiResponse, supportdtos::CreateSupportMessageDto},
    error::HttpError,
    middleware::JWTAuthMiddleware,
    AppState,
};

pub fn support_handler() -> Router {
    Router::new()
        .route("/", post(create_message))
        .route("/", get(my_messages))
}

pub async fn create_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<CreateSupportMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let message = app_state
        .db_client
        .create_support_message(auth.user.id, body.subject, body.message)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Support message sent", message)))
}

pub async fn my_messages(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let messages = app_state
        .db_client
        .get_support_messages_by_user(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Your support messages", messages)))
}
