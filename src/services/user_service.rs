//! User service

use uuid::Uuid;

use crate::{
    constants::{POINTS_HISTORY_LIMIT, RECENT_ACTIVITY_LIMIT},
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    handlers::users::response::{ProfileResponse, UserResponse},
    models::{badges_for, User},
};

/// User service for profile reads
pub struct UserService;

impl UserService {
    /// Get user by ID
    pub async fn get_user_by_id(users: &dyn UserRepository, id: Uuid) -> AppResult<User> {
        users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Full profile with derived badges, attendance and points history
    pub async fn get_profile(users: &dyn UserRepository, id: Uuid) -> AppResult<ProfileResponse> {
        let user = Self::get_user_by_id(users, id).await?;

        let attendance = users.list_attendance(id, None).await?;
        let recent_activity = attendance
            .iter()
            .take(RECENT_ACTIVITY_LIMIT as usize)
            .cloned()
            .collect();
        let points_history = users.list_points_history(id, POINTS_HISTORY_LIMIT).await?;

        Ok(ProfileResponse {
            badges: badges_for(user.days_attended),
            user: UserResponse::from(user),
            attendance,
            recent_activity,
            points_history,
        })
    }
}
