//! Account Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum Role {
    Student,
    Attendant,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Attendant => "attendant",
            Role::Manager => "manager",
        }
    }

    /// Capitalized name for user-facing messages ("Student")
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Attendant => "Attendant",
            Role::Manager => "Manager",
        }
    }

    /// Case-insensitive parse
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "student" => Some(Role::Student),
            "attendant" => Some(Role::Attendant),
            "manager" => Some(Role::Manager),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account row (includes the password hash, never serialized)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Account {
    pub user_id: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: i64,
}

/// Account response (without password)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountResponse {
    pub user_id: String,
    pub name: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: i64,
}

impl From<Account> for AccountResponse {
    fn from(a: Account) -> Self {
        Self {
            user_id: a.user_id,
            name: a.name,
            role: a.role,
            is_active: a.is_active,
            created_at: a.created_at,
        }
    }
}

/// Public self-registration payload (always creates a student)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub user_id: String,
    pub name: String,
    pub password: String,
}

/// Manager-created account payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCreate {
    pub user_id: String,
    pub name: String,
    pub role: Role,
    pub password: String,
}

/// Enable / disable payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountActiveUpdate {
    pub is_active: bool,
}

/// Login payload
///
/// `role` is what the login screen's role selector sent; when present it must
/// match the stored role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AccountResponse,
}
