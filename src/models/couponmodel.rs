use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Partner {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub logo_url: Option<String>,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Coupon {
    pub id: Uuid,
    pub partner_id: Uuid,
    pub title: String,
    pub description: String,
    pub points_cost: i32,
    pub discount_percent: BigDecimal,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// A redeemed coupon. `code` is the payload rendered as a QR code at the
/// partner's counter.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct CouponRedemption {
    pub id: Uuid,
    pub coupon_id: Uuid,
    pub user_id: Uuid,
    pub code: String,
    pub redeemed_at: Option<DateTime<Utc>>,
}
