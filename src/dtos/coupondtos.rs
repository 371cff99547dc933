use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize)]
pub struct RedeemCouponDto {
    pub coupon_id: Uuid,
}
