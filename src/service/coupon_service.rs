use std::sync::Arc;

use rand::{distr::Alphanumeric, rng, Rng};
use uuid::Uuid;

use crate::{
    db::{coupondb::CouponExt, db::DBClient, userdb::UserExt},
    models::couponmodel::{Coupon, CouponRedemption, Partner},
    service::error::ServiceError,
};

const REDEMPTION_CODE_LEN: usize = 12;

/// Point-for-discount exchange with retail partners. Redemption is a single
/// transaction in the db layer; this service adds the code generation and
/// the friendly error for a short balance.
#[derive(Debug, Clone)]
pub struct CouponService {
    db_client: Arc<DBClient>,
}

impl CouponService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn partners(&self) -> Result<Vec<Partner>, ServiceError> {
        Ok(self.db_client.get_active_partners().await?)
    }

    pub async fn coupons(&self) -> Result<Vec<Coupon>, ServiceError> {
        Ok(self.db_client.get_active_coupons().await?)
    }

    pub async fn coupons_for_partner(&self, partner_id: Uuid) -> Result<Vec<Coupon>, ServiceError> {
        Ok(self.db_client.get_coupons_by_partner(partner_id).await?)
    }

    pub async fn redeem(
        &self,
        coupon_id: Uuid,
        user_id: Uuid,
    ) -> Result<CouponRedemption, ServiceError> {
        let code: String = rng()
            .sample_iter(&Alphanumeric)
            .take(REDEMPTION_CODE_LEN)
            .map(char::from)
            .collect();

        let redemption = match self.db_client.redeem_coupon(coupon_id, user_id, code).await {
            Ok(Some(redemption)) => redemption,
            Ok(None) => {
                // balance was short; fetch both sides for the error message
                let coupon = self
                    .db_client
                    .get_active_coupons()
                    .await?
                    .into_iter()
                    .find(|c| c.id == coupon_id)
                    .ok_or(ServiceError::CouponNotFound(coupon_id))?;
                let profile = self
                    .db_client
                    .get_user(Some(user_id), None)
                    .await?
                    .ok_or(ServiceError::UserNotFound(user_id))?;

                return Err(ServiceError::InsufficientPoints {
                    required: coupon.points_cost,
                    available: profile.points,
                });
            }
            Err(sqlx::Error::RowNotFound) => {
                return Err(ServiceError::CouponNotFound(coupon_id))
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            "Coupon {} redeemed by {} (code {})",
            coupon_id,
            user_id,
            redemption.code
        );

        Ok(redemption)
    }

    pub async fn redemptions_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CouponRedemption>, ServiceError> {
        Ok(self.db_client.get_redemptions_by_user(user_id).await?)
    }
}
