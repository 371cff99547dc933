pub mod coupon_service;
pub mod error;
pub mod job_service;
pub mod moderation_service;
pub mod notification_service;
pub mod points_service;
