pub mod admin;
pub mod auth;
pub mod chat;
pub mod coupons;
pub mod jobs;
pub mod notifications;
pub mod support;
pub mod users;
