//! Admin response DTOs

use serde::Serialize;

use crate::handlers::users::response::UserResponse;

/// Pagination block for list responses
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: i64,
}

/// Admin users list response
#[derive(Debug, Serialize)]
pub struct AdminUsersListResponse {
    pub users: Vec<UserResponse>,
    pub pagination: Pagination,
}

/// Points adjustment response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustPointsResponse {
    pub message: String,
    pub current_points: i64,
}
