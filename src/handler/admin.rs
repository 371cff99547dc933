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
    db::{jobdb::JobExt, supportdb::SupportExt, userdb::UserExt},
    dtos::{
        appealdtos::{CreateAppealDto, PunishJobDto, ResolveAppealDto},
        jobdtos::ApiResponse,
        supportdtos::ReplySupportMessageDto,
        userdtos::{BanUserDto, FilterUserDto, SetLevelDto, SetRolesDto},
    },
    error::HttpError,
    middleware::JWTAuthMiddleware,
    AppState,
};

/// Punished parties file and follow their own appeals here.
pub fn appeals_handler() -> Router {
    Router::new()
        .route("/", post(create_appeal))
        .route("/", get(my_appeals))
}

/// Moderation surface, role-gated in the router.
pub fn admin_handler() -> Router {
    Router::new()
        .route("/red-list", get(red_list))
        .route("/jobs/:job_id/absolve", put(absolve_job))
        .route("/jobs/:job_id/punish", put(punish_job))
        .route("/suspicious-users", get(suspicious_users))
        .route("/appeals", get(pending_appeals))
        .route("/appeals/:appeal_id/resolve", put(resolve_appeal))
        .route("/users/:user_id/ban", put(ban_user))
        .route("/users/:user_id/unban", put(unban_user))
        .route("/users/:user_id/level", put(set_level))
        .route("/users/:user_id/roles", put(set_roles))
        .route("/category-suggestions", get(category_suggestions))
        .route("/support", get(open_support_messages))
        .route("/support/:message_id/reply", put(reply_support_message))
}

pub async fn create_appeal(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<CreateAppealDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let appeal = app_state
        .moderation_service
        .create_appeal(&auth.user, body.job_id, body.appeal_text)
        .await?;

    Ok(Json(ApiResponse::success("Appeal filed", appeal)))
}

pub async fn my_appeals(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let appeals = app_state
        .moderation_service
        .appeals_for_user(auth.user.id)
        .await?;

    Ok(Json(ApiResponse::success("Your appeals", appeals)))
}

/// Audited jobs still waiting for a verdict.
pub async fn red_list(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state.moderation_service.red_list().await?;

    Ok(Json(ApiResponse::success("Red list", jobs)))
}

pub async fn absolve_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let resolution = app_state.moderation_service.absolve(job_id).await?;

    Ok(Json(ApiResponse::success("Job absolved", resolution)))
}

pub async fn punish_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<PunishJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    let resolution = app_state
        .moderation_service
        .punish(job_id, body.ban_days)
        .await?;

    Ok(Json(ApiResponse::success("Parties punished", resolution)))
}

pub async fn suspicious_users(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let users = app_state.moderation_service.suspicious_users().await?;

    let filtered: Vec<FilterUserDto> = users.iter().map(FilterUserDto::filter_user).collect();

    Ok(Json(ApiResponse::success("Suspicious users", filtered)))
}

pub async fn pending_appeals(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let appeals = app_state.moderation_service.pending_appeals().await?;

    Ok(Json(ApiResponse::success("Pending appeals", appeals)))
}

pub async fn resolve_appeal(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(appeal_id): Path<Uuid>,
    Json(body): Json<ResolveAppealDto>,
) -> Result<impl IntoResponse, HttpError> {
    let appeal = app_state
        .moderation_service
        .resolve_appeal(appeal_id, body.approve)
        .await?;

    Ok(Json(ApiResponse::success("Appeal resolved", appeal)))
}

pub async fn ban_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<BanUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .moderation_service
        .ban_user(user_id, body.ban_days)
        .await?;

    Ok(Json(ApiResponse::success(
        "User banned",
        FilterUserDto::filter_user(&user),
    )))
}

pub async fn unban_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state.moderation_service.unban_user(user_id).await?;

    Ok(Json(ApiResponse::success(
        "User unbanned",
        FilterUserDto::filter_user(&user),
    )))
}

/// Pin a worker level by hand; the automatic recompute skips pinned rows.
pub async fn set_level(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<SetLevelDto>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .set_level(user_id, body.level, true)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Level updated",
        FilterUserDto::filter_user(&user),
    )))
}

pub async fn set_roles(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<SetRolesDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .set_roles(user_id, body.roles)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Roles updated",
        FilterUserDto::filter_user(&user),
    )))
}

/// Free-text categories clients typed in, for curating the fixed list.
pub async fn category_suggestions(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let suggestions = app_state
        .db_client
        .list_category_suggestions()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Category suggestions", suggestions)))
}

pub async fn open_support_messages(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let messages = app_state
        .db_client
        .get_open_support_messages()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Open support messages", messages)))
}

pub async fn reply_support_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(message_id): Path<Uuid>,
    Json(body): Json<ReplySupportMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let message = app_state
        .db_client
        .reply_support_message(message_id, body.reply)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                HttpError::not_found("Support message not found".to_string())
            }
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(ApiResponse::success("Reply sent", message)))
}
