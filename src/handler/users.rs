use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{jobdb::JobExt, userdb::UserExt},
    dtos::{
        jobdtos::{ApiResponse, CreatePortfolioDto},
        userdtos::{FilterUserDto, UpdateProfileDto, UserData, UserResponseDto},
    },
    error::{ErrorMessage, HttpError},
    middleware::JWTAuthMiddleware,
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/me", get(get_me))
        .route("/me", put(update_me))
        .route("/me/portfolio", post(add_portfolio_item))
        .route("/me/portfolio/:item_id", delete(delete_portfolio_item))
        .route("/:user_id/portfolio", get(worker_portfolio))
}

pub async fn get_me(
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let filtered_user = FilterUserDto::filter_user(&auth.user);

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: filtered_user,
        },
    }))
}

pub async fn update_me(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .update_profile(auth.user.id, body.name, body.phone, body.city, body.specialty)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    }))
}

pub async fn add_portfolio_item(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<CreatePortfolioDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let item = app_state
        .db_client
        .add_portfolio_item(auth.user.id, body.title, body.description, body.image_url)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Portfolio item added", item)))
}

pub async fn delete_portfolio_item(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(item_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_portfolio_item(item_id, auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("Portfolio item not found".to_string()));
    }

    Ok(Json(ApiResponse::success("Portfolio item removed", ())))
}

/// Public view of a worker's past jobs, visible to any signed-in user.
pub async fn worker_portfolio(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .get_user(Some(user_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::UserNoLongerExist.to_string()))?;

    let items = app_state
        .db_client
        .get_worker_portfolio(user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Worker portfolio", items)))
}
