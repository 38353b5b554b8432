//! User response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{AttendanceRecord, Badge, PointsEntry, User};

/// Member as exposed over the API (no credentials)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: i32,
    pub role: String,
    pub points: i64,
    pub days_attended: i32,
    pub referral_code: String,
    pub referred_by: Option<String>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            age: user.age,
            role: user.role,
            points: user.points,
            days_attended: user.days_attended,
            referral_code: user.referral_code,
            referred_by: user.referred_by,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Dashboard profile: member, badges and activity
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub badges: Vec<Badge>,
    pub attendance: Vec<AttendanceRecord>,
    pub recent_activity: Vec<AttendanceRecord>,
    pub points_history: Vec<PointsEntry>,
}
