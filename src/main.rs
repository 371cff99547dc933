mod config;
mod db;
mod dtos;
mod error;
mod handler;
mod middleware;
mod models;
mod routes;
mod service;
mod utils;

use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

use crate::config::Config;
use crate::db::{db::DBClient, notificationdb::NotificationExt};
use crate::routes::create_router;
use crate::service::{
    coupon_service::CouponService, job_service::JobService,
    moderation_service::ModerationService, notification_service::NotificationService,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
    pub job_service: Arc<JobService>,
    pub notification_service: Arc<NotificationService>,
    pub moderation_service: Arc<ModerationService>,
    pub coupon_service: Arc<CouponService>,
}

impl AppState {
    pub fn new(db_client: DBClient, config: Config) -> Self {
        let db_client = Arc::new(db_client);

        let notification_service = Arc::new(NotificationService::new(db_client.clone()));
        let job_service = Arc::new(JobService::new(
            db_client.clone(),
            notification_service.clone(),
        ));
        let moderation_service = Arc::new(ModerationService::new(
            db_client.clone(),
            notification_service.clone(),
        ));
        let coupon_service = Arc::new(CouponService::new(db_client.clone()));

        Self {
            env: config,
            db_client,
            job_service,
            notification_service,
            moderation_service,
            coupon_service,
        }
    }
}

/// Once a day, drop read notifications past the retention window.
async fn start_notification_cleanup_job(app_state: Arc<AppState>) {
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(24 * 60 * 60));
    loop {
        interval.tick().await;
        match app_state.db_client.cleanup_old_notifications().await {
            Ok(removed) if removed > 0 => {
                tracing::info!("Notification cleanup removed {} rows", removed);
            }
            Ok(_) => {}
            Err(e) => tracing::error!("Notification cleanup failed: {}", e),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    dotenv().ok();

    let config = Config::init();

    let pool = match PgPoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            println!("✅ Connection to the database is successful!");
            pool
        }
        Err(err) => {
            println!("🔥 Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    let db_client = DBClient::new(pool);

    let allowed_origins = vec![
        "http://localhost:5173".parse::<HeaderValue>().unwrap(),
        "http://localhost:8000".parse::<HeaderValue>().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE]);

    let app_state = Arc::new(AppState::new(db_client, config.clone()));

    let app = create_router(app_state.clone()).layer(cors);

    tokio::spawn(start_notification_cleanup_job(app_state.clone()));

    println!("🚀 Server is running on http://localhost:{}", config.port);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", &config.port))
        .await
        .unwrap();

    axum::serve(listener, app).await.unwrap();
}
