//! Admin service

use tracing::info;
use uuid::Uuid;

use crate::{
    constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    db::repositories::{SessionStore, UserRepository},
    error::{AppError, AppResult},
    handlers::{
        admin::response::{AdminUsersListResponse, Pagination},
        users::response::{ProfileResponse, UserResponse},
    },
    models::User,
    services::UserService,
    utils::validation::validate_role,
};

/// Admin service for member management
pub struct AdminService;

impl AdminService {
    /// List members, newest first, without credentials
    pub async fn list_users(
        users: &dyn UserRepository,
        page: Option<u32>,
        limit: Option<u32>,
        search: Option<&str>,
    ) -> AppResult<AdminUsersListResponse> {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = (page as i64 - 1) * limit as i64;
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let (found, total) = users.list(offset, limit as i64, search).await?;

        Ok(AdminUsersListResponse {
            users: found.into_iter().map(UserResponse::from).collect(),
            pagination: Pagination {
                total,
                page,
                limit,
                total_pages: (total + limit as i64 - 1) / limit as i64,
            },
        })
    }

    /// Admin view of one member: profile, full attendance and points history
    pub async fn user_detail(users: &dyn UserRepository, id: Uuid) -> AppResult<ProfileResponse> {
        UserService::get_profile(users, id).await
    }

    /// Change a member's role. Their open sessions are revoked so the new
    /// role is picked up on the next login.
    pub async fn update_user_role(
        users: &dyn UserRepository,
        sessions: &dyn SessionStore,
        actor_id: Uuid,
        target_id: Uuid,
        role: &str,
    ) -> AppResult<User> {
        validate_role(role).map_err(|e| AppError::Validation(format!("{}: {}", e, role)))?;

        if actor_id == target_id {
            return Err(AppError::Validation("Cannot change your own role".to_string()));
        }

        let user = users
            .update_role(target_id, role)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        sessions.revoke_all(target_id).await?;

        info!(actor_id = %actor_id, user_id = %target_id, role = %role, "User role updated");

        Ok(user)
    }
}
