//! Attendance badges
//!
//! Badges are derived from `days_attended` on every read and never stored.

use serde::Serialize;

use crate::constants::BADGE_THRESHOLDS;

/// Progress towards one attendance milestone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub name: String,
    pub threshold: i32,
    pub earned: bool,
    pub progress: i32,
}

/// Display name for a milestone, e.g. "100 Days"
pub fn badge_name(threshold: i32) -> String {
    format!("{} Days", threshold)
}

/// Project the badge list for a member's attendance count
pub fn badges_for(days_attended: i32) -> Vec<Badge> {
    BADGE_THRESHOLDS
        .iter()
        .map(|&threshold| Badge {
            name: badge_name(threshold),
            threshold,
            earned: days_attended >= threshold,
            progress: days_attended.clamp(0, threshold),
        })
        .collect()
}

/// Badge newly earned by the session that moved the counter to `days_attended`.
///
/// Exact equality: a counter that jumps past a threshold (for example after
/// a manual correction) does not award it.
pub fn milestone_reached(days_attended: i32) -> Option<String> {
    BADGE_THRESHOLDS
        .iter()
        .find(|&&threshold| threshold == days_attended)
        .map(|&threshold| badge_name(threshold))
}
