//! User handler implementations

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::UserService,
    state::AppState,
};

use super::response::ProfileResponse;

/// Profile of the member behind the current session
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ProfileResponse>> {
    let profile = UserService::get_profile(state.users(), auth_user.id).await?;
    Ok(Json(profile))
}
