//! Attendance request DTOs

use serde::Deserialize;

/// Mark a completed session
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    pub duration_minutes: Option<i32>,
}
