//! Attendance model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A completed practice session. Append-only.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub attended_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub active: bool,
}

/// Counters after an attendance record was appended
#[derive(Debug, Clone)]
pub struct AttendanceOutcome {
    pub record: AttendanceRecord,
    pub points: i64,
    pub days_attended: i32,
}
