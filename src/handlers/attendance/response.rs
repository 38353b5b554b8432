//! Attendance response DTOs

use serde::Serialize;

/// Result of marking attendance
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceResponse {
    pub message: String,
    pub badge_earned: Option<String>,
    pub points: i64,
    pub days_attended: i32,
}
