//! Attendance handler implementations

use axum::{extract::State, Json};

use crate::{
    error::{AppError, AppResult},
    handlers::extract::AppJson,
    middleware::auth::AuthenticatedUser,
    services::LedgerService,
    state::AppState,
};

use super::{request::MarkAttendanceRequest, response::MarkAttendanceResponse};

/// Record a completed session for the current member
pub async fn mark_attendance(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppJson(payload): AppJson<MarkAttendanceRequest>,
) -> AppResult<Json<MarkAttendanceResponse>> {
    let duration_minutes = payload
        .duration_minutes
        .ok_or_else(|| AppError::Validation("Duration is required".to_string()))?;

    let result =
        LedgerService::record_attendance(state.users(), auth_user.id, duration_minutes).await?;

    Ok(Json(MarkAttendanceResponse {
        message: "Attendance recorded successfully".to_string(),
        badge_earned: result.badge_earned,
        points: result.points,
        days_attended: result.days_attended,
    }))
}
