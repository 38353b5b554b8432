//! Authentication response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::handlers::users::response::UserResponse;

/// Signup success response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    pub user_id: Uuid,
    pub referral_code: String,
}

/// Login success response; the token is also set as a cookie
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub user: UserResponse,
    pub is_admin: bool,
    pub token: String,
    pub expires_in: i64,
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}
