use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::jobdtos::{ApiResponse, CancelJobDto, ConfirmJobDto, CreateJobDto, FinishJobDto},
    error::HttpError,
    middleware::JWTAuthMiddleware,
    AppState,
};

pub fn jobs_handler() -> Router {
    Router::new()
        .route("/", post(post_job))
        .route("/open", get(open_jobs))
        .route("/client", get(client_jobs))
        .route("/worker", get(worker_jobs))
        .route("/:job_id", get(get_job))
        .route("/:job_id/accept", put(accept_job))
        .route("/:job_id/finish", put(finish_job))
        .route("/:job_id/confirm", put(confirm_job))
        .route("/:job_id/cancel", put(cancel_job))
}

pub async fn post_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<CreateJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let job = app_state.job_service.post_job(&auth.user, body).await?;

    Ok(Json(ApiResponse::success("Job posted", job)))
}

/// Pending jobs in the worker's city, filtered to their specialty.
pub async fn open_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state.job_service.open_jobs_for_worker(&auth.user).await?;

    Ok(Json(ApiResponse::success("Open jobs", jobs)))
}

pub async fn client_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state.job_service.jobs_for_client(auth.user.id).await?;

    Ok(Json(ApiResponse::success("Jobs you posted", jobs)))
}

pub async fn worker_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state.job_service.jobs_for_worker(auth.user.id).await?;

    Ok(Json(ApiResponse::success("Jobs you accepted", jobs)))
}

pub async fn get_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state.job_service.get_job(job_id).await?;

    Ok(Json(ApiResponse::success("Job", job)))
}

pub async fn accept_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state.job_service.accept_job(&auth.user, job_id).await?;

    Ok(Json(ApiResponse::success("Job accepted", job)))
}

pub async fn finish_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<FinishJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let job = app_state
        .job_service
        .finish_job(&auth.user, job_id, body)
        .await?;

    Ok(Json(ApiResponse::success("Job sent for verification", job)))
}

pub async fn confirm_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<ConfirmJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let result = app_state
        .job_service
        .confirm_and_rate(&auth.user, job_id, body)
        .await?;

    Ok(Json(ApiResponse::success("Job completed", result)))
}

pub async fn cancel_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<CancelJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let job = app_state
        .job_service
        .cancel_job(&auth.user, job_id, body)
        .await?;

    Ok(Json(ApiResponse::success("Job cancelled", job)))
}
