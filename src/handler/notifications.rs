use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::{
    db::notificationdb::NotificationExt, dtos::jobdtos::ApiResponse, error::HttpError,
    middleware::JWTAuthMiddleware, AppState,
};

pub fn notifications_handler() -> Router {
    Router::new()
        .route("/", get(list_notifications))
        .route("/unread-count", get(unread_count))
        .route("/:notification_id/read", put(mark_read))
        .route("/read-all", put(mark_all_read))
}

/// Unread notifications plus read ones still inside the retention window.
pub async fn list_notifications(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let notifications = app_state
        .db_client
        .get_visible_notifications(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Notifications", notifications)))
}

pub async fn unread_count(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let count = app_state
        .db_client
        .count_unread(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Unread count", count)))
}

pub async fn mark_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(notification_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let notification = app_state
        .db_client
        .mark_notification_read(notification_id, auth.user.id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                HttpError::not_found("Notification not found".to_string())
            }
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(ApiResponse::success("Notification read", notification)))
}

pub async fn mark_all_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let updated = app_state
        .db_client
        .mark_all_read(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("All notifications read", updated)))
}
