use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        admin::{admin_handler, appeals_handler},
        auth::auth_handler,
        chat::chat_handler,
        coupons::coupons_handler,
        jobs::jobs_handler,
        notifications::notifications_handler,
        support::support_handler,
        users::users_handler,
    },
    middleware::{auth, role_check},
    models::usermodel::UserRole,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/users", users_handler().layer(middleware::from_fn(auth)))
        .nest("/jobs", jobs_handler().layer(middleware::from_fn(auth)))
        .nest("/chat", chat_handler().layer(middleware::from_fn(auth)))
        .nest(
            "/notifications",
            notifications_handler().layer(middleware::from_fn(auth)),
        )
        .nest("/coupons", coupons_handler().layer(middleware::from_fn(auth)))
        .nest("/appeals", appeals_handler().layer(middleware::from_fn(auth)))
        .nest("/support", support_handler().layer(middleware::from_fn(auth)))
        .nest(
            "/admin",
            admin_handler()
                .layer(middleware::from_fn(|req, next| {
                    role_check(req, next, vec![UserRole::Admin])
                }))
                .layer(middleware::from_fn(auth)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
