use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::usermodel::{Profile, UserRole, WorkerLevel};
use crate::utils::validation;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,

    #[validate(
        length(min = 1, message = "Confirm Password is required"),
        must_match(other = "password", message = "passwords do not match")
    )]
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: String,

    pub phone: Option<String>,

    pub cpf: Option<String>,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    pub specialty: Option<String>,

    pub roles: Vec<UserRole>,
}

impl RegisterUserDto {
    /// Locale checks the derive can't express: CPF checksum, Brazilian phone
    /// shape, and a typo hint for common mail domains.
    pub fn validate_documents(&self) -> Result<(), ValidationError> {
        if let Some(cpf) = &self.cpf {
            if !validation::is_valid_cpf(cpf) {
                let mut error = ValidationError::new("invalid_cpf");
                error.message = Some(Cow::from("CPF is invalid"));
                return Err(error);
            }
        }

        if let Some(phone) = &self.phone {
            if !validation::is_valid_phone(phone) {
                let mut error = ValidationError::new("invalid_phone");
                error.message = Some(Cow::from("Phone number is invalid"));
                return Err(error);
            }
        }

        if let Some(suggestion) = validation::suggest_email_correction(&self.email) {
            let mut error = ValidationError::new("email_typo");
            error.message = Some(Cow::from(format!("Did you mean {}?", suggestion)));
            return Err(error);
        }

        Ok(())
    }
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    pub phone: Option<String>,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    pub specialty: Option<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct SetLevelDto {
    pub level: WorkerLevel,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct SetRolesDto {
    #[validate(length(min = 1, message = "At least one role is required"))]
    pub roles: Vec<UserRole>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BanUserDto {
    /// Days of suspension; omit for an indefinite ban.
    pub ban_days: Option<i64>,
}

/// Public view of a profile, without credentials.
#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub city: String,
    pub specialty: Option<String>,
    pub allowed_roles: Vec<UserRole>,
    pub role: String,
    pub points: i32,
    pub level: WorkerLevel,
    pub active: bool,
    pub punishment_until: Option<DateTime<Utc>>,
    pub suspicious_flag: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &Profile) -> Self {
        FilterUserDto {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            city: user.city.clone(),
            specialty: user.specialty.clone(),
            allowed_roles: user.allowed_roles.clone(),
            role: user.primary_role().to_str().to_string(),
            points: user.points,
            level: user.level,
            active: user.active,
            punishment_until: user.punishment_until,
            suspicious_flag: user.suspicious_flag,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub status: String,
    pub data: UserData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub status: String,
    pub token: String,
}
