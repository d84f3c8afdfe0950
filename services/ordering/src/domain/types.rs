use chrono::{DateTime, Utc};

pub const ROLE_NAME_MAX: usize = 100;
pub const USERNAME_MAX: usize = 100;
pub const DISPLAY_NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 254;
pub const PHONE_NUMBER_MAX: usize = 20;
pub const PASSWORD_HASH_MAX: usize = 100;
pub const CATEGORY_NAME_MAX: usize = 100;
pub const FOOD_NAME_MAX: usize = 100;
pub const FOOD_DESCRIPTION_MAX: usize = 6000;

/// Registered account, without credential material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub is_user_active: bool,
    pub two_factor_enabled: bool,
    pub lockout_enabled: bool,
    pub lockout_end: Option<DateTime<Utc>>,
    pub access_failed_count: i32,
    pub last_visit_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input for a new account. `password_hash` is produced by the caller.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password_hash: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), String> {
        required("username", &self.username, USERNAME_MAX)?;
        required("password hash", &self.password_hash, PASSWORD_HASH_MAX)?;
        optional("display name", self.display_name.as_deref(), DISPLAY_NAME_MAX)?;
        optional("email", self.email.as_deref(), EMAIL_MAX)?;
        optional("phone number", self.phone_number.as_deref(), PHONE_NUMBER_MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewRole {
    pub name: String,
}

impl NewRole {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> Result<(), String> {
        required("role name", &self.name, ROLE_NAME_MAX)
    }
}

/// Result of role creation: `error` is empty on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleOutcome {
    pub succeeded: bool,
    pub error: String,
}

impl CreateRoleOutcome {
    pub const ALREADY_EXISTS: &'static str = "This role is already exists.";

    pub fn success() -> Self {
        Self {
            succeeded: true,
            error: String::new(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodCategory {
    pub id: i32,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Smallest currency unit.
    pub price: i64,
    pub is_active: bool,
    pub food_category_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewFood {
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub is_active: bool,
    pub food_category_id: i32,
}

impl NewFood {
    pub fn validate(&self) -> Result<(), String> {
        required("food name", &self.name, FOOD_NAME_MAX)?;
        optional("description", self.description.as_deref(), FOOD_DESCRIPTION_MAX)
    }
}

pub fn validate_category_name(name: Option<&str>) -> Result<(), String> {
    optional("category name", name, CATEGORY_NAME_MAX)
}

// Lengths are counted in characters, matching varchar(n).
fn required(field: &str, value: &str, max: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    optional(field, Some(value), max)
}

fn optional(field: &str, value: Option<&str>, max: usize) -> Result<(), String> {
    match value {
        Some(v) if v.chars().count() > max => {
            Err(format!("{field} must be at most {max} characters"))
        }
        _ => Ok(()),
    }
}
