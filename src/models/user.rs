//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::roles;

/// User database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: i32,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub points: i64,
    pub days_attended: i32,
    pub referral_code: String,
    pub referred_by: Option<String>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if user has admin privileges
    pub fn is_admin(&self) -> bool {
        self.role == roles::ADMIN
    }
}

/// Fields required to insert a new member
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: i32,
    pub password_hash: String,
    pub role: String,
    pub referral_code: String,
}

/// Result of inserting a member together with an optional referral credit
#[derive(Debug, Clone)]
pub struct SignupOutcome {
    pub user: User,
    /// Referrer credited in the same transaction, if the code resolved
    pub referrer_id: Option<Uuid>,
}
