use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::{
    dtos::{coupondtos::RedeemCouponDto, jobdtos::ApiResponse},
    error::HttpError,
    middleware::JWTAuthMiddleware,
    AppState,
};

pub fn coupons_handler() -> Router {
    Router::new()
        .route("/partners", get(list_partners))
        .route("/", get(list_coupons))
        .route("/partners/:partner_id", get(partner_coupons))
        .route("/redeem", post(redeem_coupon))
        .route("/redemptions", get(my_redemptions))
}

pub async fn list_partners(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let partners = app_state.coupon_service.partners().await?;

    Ok(Json(ApiResponse::success("Partners", partners)))
}

pub async fn list_coupons(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let coupons = app_state.coupon_service.coupons().await?;

    Ok(Json(ApiResponse::success("Coupons", coupons)))
}

pub async fn partner_coupons(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(partner_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let coupons = app_state
        .coupon_service
        .coupons_for_partner(partner_id)
        .await?;

    Ok(Json(ApiResponse::success("Partner coupons", coupons)))
}

pub async fn redeem_coupon(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<RedeemCouponDto>,
) -> Result<impl IntoResponse, HttpError> {
    let redemption = app_state
        .coupon_service
        .redeem(body.coupon_id, auth.user.id)
        .await?;

    Ok(Json(ApiResponse::success("Coupon redeemed", redemption)))
}

pub async fn my_redemptions(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let redemptions = app_state
        .coupon_service
        .redemptions_for_user(auth.user.id)
        .await?;

    Ok(Json(ApiResponse::success("Your redemptions", redemptions)))
}
