use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::usermodel::{Profile, UserRole, WorkerLevel};

pub const PROFILE_COLUMNS: &str = r#"
    id, name, email, password, phone, cpf, city, specialty,
    allowed_roles, points, level, level_admin_override, level_before_ban,
    active, punishment_until, suspicious_flag, created_at, updated_at
"#;

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<Profile>, Error>;

    #[allow(clippy::too_many_arguments)]
    async fn save_user(
        &self,
        name: String,
        email: String,
        password: String,
        phone: Option<String>,
        cpf: Option<String>,
        city: String,
        specialty: Option<String>,
        allowed_roles: Vec<UserRole>,
    ) -> Result<Profile, Error>;

    async fn update_profile(
        &self,
        user_id: Uuid,
        name: String,
        phone: Option<String>,
        city: String,
        specialty: Option<String>,
    ) -> Result<Profile, Error>;

    /// Clamped at zero on the way down.
    async fn increment_points(&self, user_id: Uuid, amount: i32) -> Result<Profile, Error>;

    /// Recompute the points-derived level, skipping admin-pinned profiles.
    async fn refresh_level(&self, user_id: Uuid) -> Result<Profile, Error>;

    async fn set_level(
        &self,
        user_id: Uuid,
        level: WorkerLevel,
        admin_override: bool,
    ) -> Result<Profile, Error>;

    async fn set_roles(&self, user_id: Uuid, roles: Vec<UserRole>) -> Result<Profile, Error>;

    async fn set_suspicious_flag(&self, user_id: Uuid, flagged: bool) -> Result<Profile, Error>;

    /// Ban: deactivate and open the punishment window (NULL = indefinite).
    /// Worker profiles additionally have their level remembered and dropped
    /// to bronze; client-only profiles keep theirs.
    async fn ban_user(
        &self,
        user_id: Uuid,
        punishment_until: Option<DateTime<Utc>>,
    ) -> Result<Profile, Error>;

    /// Lift a ban and restore the pre-ban level when one was recorded.
    async fn unban_user(&self, user_id: Uuid) -> Result<Profile, Error>;

    async fn list_suspicious_users(&self) -> Result<Vec<Profile>, Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<Profile>, Error> {
        if let Some(user_id) = user_id {
            sqlx::query_as::<_, Profile>(&format!(
                "SELECT {} FROM profiles WHERE id = $1",
                PROFILE_COLUMNS
            ))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
        } else if let Some(email) = email {
            sqlx::query_as::<_, Profile>(&format!(
                "SELECT {} FROM profiles WHERE email = $1",
                PROFILE_COLUMNS
            ))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
        } else {
            Ok(None)
        }
    }

    async fn save_user(
        &self,
        name: String,
        email: String,
        password: String,
        phone: Option<String>,
        cpf: Option<String>,
        city: String,
        specialty: Option<String>,
        allowed_roles: Vec<UserRole>,
    ) -> Result<Profile, Error> {
        sqlx::query_as::<_, Profile>(&format!(
            r#"
            INSERT INTO profiles (name, email, password, phone, cpf, city, specialty, allowed_roles)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(name)
        .bind(email)
        .bind(password)
        .bind(phone)
        .bind(cpf)
        .bind(city)
        .bind(specialty)
        .bind(allowed_roles)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        name: String,
        phone: Option<String>,
        city: String,
        specialty: Option<String>,
    ) -> Result<Profile, Error> {
        sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET name = $2, phone = $3, city = $4, specialty = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .bind(name)
        .bind(phone)
        .bind(city)
        .bind(specialty)
        .fetch_one(&self.pool)
        .await
    }

    async fn increment_points(&self, user_id: Uuid, amount: i32) -> Result<Profile, Error> {
        sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET points = GREATEST(0, points + $2), updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .bind(amount)
        .fetch_one(&self.pool)
        .await
    }

    async fn refresh_level(&self, user_id: Uuid) -> Result<Profile, Error> {
        let profile = self
            .get_user(Some(user_id), None)
            .await?
            .ok_or(Error::RowNotFound)?;

        if profile.level_admin_override {
            return Ok(profile);
        }

        let level = WorkerLevel::for_points(profile.points);
        sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET level = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .bind(level)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_level(
        &self,
        user_id: Uuid,
        level: WorkerLevel,
        admin_override: bool,
    ) -> Result<Profile, Error> {
        sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET level = $2, level_admin_override = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .bind(level)
        .bind(admin_override)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_roles(&self, user_id: Uuid, roles: Vec<UserRole>) -> Result<Profile, Error> {
        sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET allowed_roles = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .bind(roles)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_suspicious_flag(&self, user_id: Uuid, flagged: bool) -> Result<Profile, Error> {
        sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET suspicious_flag = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .bind(flagged)
        .fetch_one(&self.pool)
        .await
    }

    async fn ban_user(
        &self,
        user_id: Uuid,
        punishment_until: Option<DateTime<Utc>>,
    ) -> Result<Profile, Error> {
        sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET active = FALSE,
                punishment_until = $2,
                level_before_ban = CASE
                    WHEN 'worker' = ANY(allowed_roles::TEXT[]) THEN level
                    ELSE level_before_ban
                END,
                level = CASE
                    WHEN 'worker' = ANY(allowed_roles::TEXT[]) THEN 'bronze'::worker_level
                    ELSE level
                END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .bind(punishment_until)
        .fetch_one(&self.pool)
        .await
    }

    async fn unban_user(&self, user_id: Uuid) -> Result<Profile, Error> {
        sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET active = TRUE,
                punishment_until = NULL,
                level = COALESCE(level_before_ban, level),
                level_before_ban = NULL,
                suspicious_flag = FALSE,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_suspicious_users(&self) -> Result<Vec<Profile>, Error> {
        sqlx::query_as::<_, Profile>(&format!(
            "SELECT {} FROM profiles WHERE suspicious_flag = TRUE ORDER BY updated_at DESC",
            PROFILE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
    }
}
