use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Client,
    Worker,
    Partner,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Client => "client",
            UserRole::Worker => "worker",
            UserRole::Partner => "partner",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, PartialOrd)]
#[sqlx(type_name = "worker_level", rename_all = "snake_case")]
pub enum WorkerLevel {
    Bronze,
    Silver,
    Gold,
    Diamond,
}

impl WorkerLevel {
    /// Tier for a lifetime point total. Ignored for profiles with an
    /// admin-pinned level.
    pub fn for_points(points: i32) -> WorkerLevel {
        match points {
            p if p >= 4000 => WorkerLevel::Diamond,
            p if p >= 1500 => WorkerLevel::Gold,
            p if p >= 500 => WorkerLevel::Silver,
            _ => WorkerLevel::Bronze,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Profile {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub phone: Option<String>,
    pub cpf: Option<String>,
    pub city: String,
    pub specialty: Option<String>,
    // First role is the primary one used for dashboard routing.
    pub allowed_roles: Vec<UserRole>,
    pub points: i32,
    pub level: WorkerLevel,
    pub level_admin_override: bool,
    pub level_before_ban: Option<WorkerLevel>,
    pub active: bool,
    pub punishment_until: Option<DateTime<Utc>>,
    pub suspicious_flag: bool,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn primary_role(&self) -> UserRole {
        self.allowed_roles.first().copied().unwrap_or(UserRole::Client)
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.allowed_roles.contains(&role)
    }

    /// A profile is banned while inactive with its punishment window still
    /// open (or open-ended).
    pub fn is_banned(&self, now: DateTime<Utc>) -> bool {
        if self.active {
            return false;
        }
        match self.punishment_until {
            Some(until) => until > now,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn profile(active: bool, punishment_until: Option<DateTime<Utc>>) -> Profile {
        Profile {
            id: uuid::Uuid::nil(),
            name: "Maria".to_string(),
            email: "maria@example.com".to_string(),
            password: String::new(),
            phone: None,
            cpf: None,
            city: "Fortaleza".to_string(),
            specialty: None,
            allowed_roles: vec![UserRole::Worker, UserRole::Client],
            points: 0,
            level: WorkerLevel::Bronze,
            level_admin_override: false,
            level_before_ban: None,
            active,
            punishment_until,
            suspicious_flag: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn level_thresholds() {
        assert_eq!(WorkerLevel::for_points(0), WorkerLevel::Bronze);
        assert_eq!(WorkerLevel::for_points(499), WorkerLevel::Bronze);
        assert_eq!(WorkerLevel::for_points(500), WorkerLevel::Silver);
        assert_eq!(WorkerLevel::for_points(1500), WorkerLevel::Gold);
        assert_eq!(WorkerLevel::for_points(4000), WorkerLevel::Diamond);
    }

    #[test]
    fn ban_expires_with_window() {
        let now = Utc::now();
        let banned = profile(false, Some(now + Duration::days(3)));
        assert!(banned.is_banned(now));

        let expired = profile(false, Some(now - Duration::days(1)));
        assert!(!expired.is_banned(now));

        let indefinite = profile(false, None);
        assert!(indefinite.is_banned(now));

        let active = profile(true, Some(now + Duration::days(3)));
        assert!(!active.is_banned(now));
    }

    #[test]
    fn primary_role_is_first() {
        let p = profile(true, None);
        assert_eq!(p.primary_role(), UserRole::Worker);
        assert!(p.has_role(UserRole::Client));
        assert!(!p.has_role(UserRole::Admin));
    }
}
