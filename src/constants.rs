//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Request timeout applied to every route
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum accepted request body size
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

/// How long to wait for a pooled connection before failing the request
pub const DATABASE_ACQUIRE_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default session lifetime in hours
pub const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 24;

/// Default name of the session cookie
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "auth";

/// Length of the random session id embedded in tokens
pub const SESSION_ID_LENGTH: usize = 32;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Maximum display name length
pub const MAX_NAME_LENGTH: u64 = 100;

/// Youngest accepted member age
pub const MIN_AGE: i32 = 1;

/// Oldest accepted member age
pub const MAX_AGE: i32 = 120;

// =============================================================================
// LEDGER POLICY
// =============================================================================

/// Shortest session that counts as attendance, in minutes
pub const MIN_SESSION_MINUTES: i32 = 5;

/// Points credited per accepted attendance session
pub const ATTENDANCE_POINTS: i64 = 1;

/// Points credited to a referrer when their code is used at signup
pub const REFERRAL_REWARD_POINTS: i64 = 50;

/// Attendance milestones that award a badge
pub const BADGE_THRESHOLDS: [i32; 3] = [100, 200, 300];

/// Number of attendance records shown as recent activity
pub const RECENT_ACTIVITY_LIMIT: i64 = 5;

/// Number of points history entries returned with a profile
pub const POINTS_HISTORY_LIMIT: i64 = 20;

/// Ledger entry reasons
pub mod reasons {
    pub const ATTENDANCE: &str = "Attendance session";
    pub const REFERRAL: &str = "Referral reward";
    pub const ADMIN_ADJUSTMENT: &str = "Admin adjustment";
}

// =============================================================================
// REFERRAL CODES
// =============================================================================

/// Characters taken from the member's name
pub const REFERRAL_PREFIX_LENGTH: usize = 5;

/// Random base-36 characters appended to the prefix
pub const REFERRAL_SUFFIX_LENGTH: usize = 4;

/// Prefix used when a name has no usable characters
pub const REFERRAL_FALLBACK_PREFIX: &str = "YOGA";

/// How many codes to try before giving up on a unique one
pub const MAX_REFERRAL_CODE_ATTEMPTS: usize = 5;

/// Longest referral code accepted from a signup payload
pub const MAX_REFERRAL_CODE_LENGTH: u64 = 16;

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const MEMBER: &str = "member";

    /// All user roles
    pub const ALL: &[&str] = &[ADMIN, MEMBER];
}

// =============================================================================
// API
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api";

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum length of an admin adjustment reason
pub const MAX_REASON_LENGTH: u64 = 200;
