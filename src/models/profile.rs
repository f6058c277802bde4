use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::Role;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub full_name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub is_deprioritized: bool,
    pub account_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Self-service profile edits
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

/// Admin-only flag changes. The handler returns the updated profile.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileFlagsUpdate {
    pub account_approved: Option<bool>,
    pub is_deprioritized: Option<bool>,
}

/// Internal registration payload, built by the auth service after validation.
/// When `company_name` is set the repository creates the company row in the
/// same transaction as the profile.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub account_approved: bool,
    pub company_name: Option<String>,
}
