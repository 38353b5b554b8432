//! Membership ledger
//!
//! All point, attendance and referral changes for a member go through here.
//! Each operation is a single atomic write in the repository, so a rejected
//! or failed event leaves the member untouched.

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    constants::{reasons, ATTENDANCE_POINTS, MIN_SESSION_MINUTES, REFERRAL_REWARD_POINTS},
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::{milestone_reached, AttendanceRecord, NewUser, SignupOutcome},
    utils::{normalize_referral_code, validation::sanitize_string},
};

/// Outcome of a recorded attendance session
#[derive(Debug, Clone)]
pub struct AttendanceResult {
    pub record: AttendanceRecord,
    /// Badge earned by this very session, if it hit a milestone exactly
    pub badge_earned: Option<String>,
    pub points: i64,
    pub days_attended: i32,
}

/// Ledger operations
pub struct LedgerService;

impl LedgerService {
    /// Record a completed session: one attendance record, +1 day, +1 point.
    pub async fn record_attendance(
        users: &dyn UserRepository,
        user_id: Uuid,
        duration_minutes: i32,
    ) -> AppResult<AttendanceResult> {
        if duration_minutes < MIN_SESSION_MINUTES {
            return Err(AppError::Validation(format!(
                "Session must be at least {} minutes to be counted",
                MIN_SESSION_MINUTES
            )));
        }

        let outcome = users
            .record_attendance(user_id, duration_minutes, ATTENDANCE_POINTS)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let badge_earned = milestone_reached(outcome.days_attended);

        info!(
            user_id = %user_id,
            duration_minutes,
            days_attended = outcome.days_attended,
            points = outcome.points,
            badge = ?badge_earned,
            "Attendance recorded"
        );

        Ok(AttendanceResult {
            record: outcome.record,
            badge_earned,
            points: outcome.points,
            days_attended: outcome.days_attended,
        })
    }

    /// Apply an admin adjustment. `delta` may be negative and the balance has
    /// no lower bound.
    pub async fn adjust_points(
        users: &dyn UserRepository,
        user_id: Uuid,
        delta: i64,
        reason: Option<&str>,
    ) -> AppResult<i64> {
        let reason = reason
            .map(sanitize_string)
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| reasons::ADMIN_ADJUSTMENT.to_string());

        let balance = users
            .adjust_points(user_id, delta, &reason)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if balance < 0 {
            warn!(user_id = %user_id, balance, "Points balance is negative after adjustment");
        }

        info!(user_id = %user_id, delta, balance, reason = %reason, "Points adjusted");

        Ok(balance)
    }

    /// Create a member and redeem the referral code they signed up with.
    ///
    /// An unknown code is not an error: the account is still created and no
    /// one is credited.
    pub async fn enroll_with_referral(
        users: &dyn UserRepository,
        new_user: NewUser,
        referred_by: Option<&str>,
    ) -> AppResult<SignupOutcome> {
        let referral_code = normalize_referral_code(referred_by);
        let cited = referral_code.clone();

        let outcome = users
            .create_with_referral(new_user, referral_code, REFERRAL_REWARD_POINTS)
            .await?;

        match (cited, outcome.referrer_id) {
            (Some(code), Some(referrer_id)) => info!(
                user_id = %outcome.user.id,
                referrer_id = %referrer_id,
                code = %code,
                reward = REFERRAL_REWARD_POINTS,
                "Referral redeemed"
            ),
            (Some(code), None) => info!(
                user_id = %outcome.user.id,
                code = %code,
                "Referral code matched no member, nothing credited"
            ),
            _ => {}
        }

        Ok(outcome)
    }
}
