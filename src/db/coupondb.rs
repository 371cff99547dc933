use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::couponmodel::{Coupon, CouponRedemption, Partner};

const COUPON_COLUMNS: &str =
    "id, partner_id, title, description, points_cost, discount_percent, active, created_at";

#[async_trait]
pub trait CouponExt {
    async fn get_active_partners(&self) -> Result<Vec<Partner>, Error>;

    async fn get_active_coupons(&self) -> Result<Vec<Coupon>, Error>;

    async fn get_coupons_by_partner(&self, partner_id: Uuid) -> Result<Vec<Coupon>, Error>;

    /// One transaction that locks the profile row, checks the balance,
    /// debits the points and records the redemption with its QR code
    /// payload. `Ok(None)` means the balance was insufficient and nothing
    /// was changed.
    async fn redeem_coupon(
        &self,
        coupon_id: Uuid,
        user_id: Uuid,
        code: String,
    ) -> Result<Option<CouponRedemption>, Error>;

    async fn get_redemptions_by_user(&self, user_id: Uuid)
        -> Result<Vec<CouponRedemption>, Error>;
}

#[async_trait]
impl CouponExt for DBClient {
    async fn get_active_partners(&self) -> Result<Vec<Partner>, Error> {
        sqlx::query_as::<_, Partner>(
            r#"
            SELECT id, name, description, logo_url, active, created_at
            FROM partners
            WHERE active = TRUE
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_active_coupons(&self) -> Result<Vec<Coupon>, Error> {
        sqlx::query_as::<_, Coupon>(&format!(
            "SELECT {} FROM coupons WHERE active = TRUE ORDER BY points_cost ASC",
            COUPON_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn get_coupons_by_partner(&self, partner_id: Uuid) -> Result<Vec<Coupon>, Error> {
        sqlx::query_as::<_, Coupon>(&format!(
            "SELECT {} FROM coupons WHERE partner_id = $1 AND active = TRUE ORDER BY points_cost ASC",
            COUPON_COLUMNS
        ))
        .bind(partner_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn redeem_coupon(
        &self,
        coupon_id: Uuid,
        user_id: Uuid,
        code: String,
    ) -> Result<Option<CouponRedemption>, Error> {
        let mut tx = self.pool.begin().await?;

        let coupon = sqlx::query_as::<_, Coupon>(&format!(
            "SELECT {} FROM coupons WHERE id = $1 AND active = TRUE",
            COUPON_COLUMNS
        ))
        .bind(coupon_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(Error::RowNotFound)?;

        let points: (i32,) =
            sqlx::query_as("SELECT points FROM profiles WHERE id = $1 FOR UPDATE")
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await?;

        if points.0 < coupon.points_cost {
            tx.rollback().await?;
            return Ok(None);
        }

        sqlx::query("UPDATE profiles SET points = points - $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(coupon.points_cost)
            .execute(&mut *tx)
            .await?;

        let redemption = sqlx::query_as::<_, CouponRedemption>(
            r#"
            INSERT INTO coupon_redemptions (coupon_id, user_id, code)
            VALUES ($1, $2, $3)
            RETURNING id, coupon_id, user_id, code, redeemed_at
            "#,
        )
        .bind(coupon_id)
        .bind(user_id)
        .bind(code)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(redemption))
    }

    async fn get_redemptions_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CouponRedemption>, Error> {
        sqlx::query_as::<_, CouponRedemption>(
            r#"
            SELECT id, coupon_id, user_id, code, redeemed_at
            FROM coupon_redemptions
            WHERE user_id = $1
            ORDER BY redeemed_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}
