//! Admin handler implementations

use axum::{extract::State, Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    handlers::{
        extract::{AppJson, AppPath, AppQuery},
        users::response::{ProfileResponse, UserResponse},
    },
    middleware::auth::{require_admin, AuthenticatedUser},
    services::{AdminService, LedgerService},
    state::AppState,
};

use super::{
    request::{AdjustPointsRequest, ListUsersQuery, UpdateUserRoleRequest},
    response::{AdjustPointsResponse, AdminUsersListResponse},
};

/// List all members
pub async fn list_users(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppQuery(query): AppQuery<ListUsersQuery>,
) -> AppResult<Json<AdminUsersListResponse>> {
    require_admin(&auth_user)?;

    let users = AdminService::list_users(
        state.users(),
        query.page,
        query.limit,
        query.search.as_deref(),
    )
    .await?;

    Ok(Json(users))
}

/// One member with attendance and points history
pub async fn get_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ProfileResponse>> {
    require_admin(&auth_user)?;

    let profile = AdminService::user_detail(state.users(), id).await?;

    Ok(Json(profile))
}

/// Update a member's role
pub async fn update_user_role(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateUserRoleRequest>,
) -> AppResult<Json<UserResponse>> {
    require_admin(&auth_user)?;
    payload.validate()?;

    let user = AdminService::update_user_role(
        state.users(),
        state.sessions(),
        auth_user.id,
        id,
        &payload.role,
    )
    .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Add or deduct points
pub async fn adjust_points(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppJson(payload): AppJson<AdjustPointsRequest>,
) -> AppResult<Json<AdjustPointsResponse>> {
    require_admin(&auth_user)?;
    payload.validate()?;

    let delta = payload
        .points
        .ok_or_else(|| AppError::Validation("Points are required".to_string()))?;

    let current_points = LedgerService::adjust_points(
        state.users(),
        payload.user_id,
        delta,
        payload.reason.as_deref(),
    )
    .await?;

    Ok(Json(AdjustPointsResponse {
        message: "Points updated successfully".to_string(),
        current_points,
    }))
}
