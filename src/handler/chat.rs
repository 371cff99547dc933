use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::chatdb::ChatExt,
    dtos::{chatdtos::SendMessageDto, jobdtos::ApiResponse},
    error::HttpError,
    middleware::JWTAuthMiddleware,
    models::{jobmodel::Job, usermodel::Profile},
    AppState,
};

pub fn chat_handler() -> Router {
    Router::new()
        .route("/:job_id/messages", get(list_messages))
        .route("/:job_id/messages", post(send_message))
}

// The chat is scoped to the two parties of a job.
fn ensure_party(job: &Job, user: &Profile) -> Result<(), HttpError> {
    let is_party = job.client_id == user.id || job.worker_id == Some(user.id);
    if !is_party {
        return Err(HttpError::forbidden("You are not part of this conversation"));
    }
    Ok(())
}

pub async fn list_messages(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state.job_service.get_job(job_id).await?;
    ensure_party(&job, &auth.user)?;

    let messages = app_state
        .db_client
        .get_messages_for_job(job_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Messages", messages)))
}

pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<SendMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if body.is_empty() {
        return Err(HttpError::bad_request(
            "A message needs text, an image or an audio clip",
        ));
    }

    let job = app_state.job_service.get_job(job_id).await?;
    ensure_party(&job, &auth.user)?;

    let message = app_state
        .db_client
        .insert_message(job_id, auth.user.id, body.content, body.image_url, body.audio_url)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Message sent", message)))
}
