//! User repository
//!
//! The ledger talks to storage through [`UserRepository`]. The PostgreSQL
//! implementation groups every multi-row change in a single transaction so
//! a ledger event either applies completely or not at all.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::reasons,
    error::AppResult,
    models::{AttendanceOutcome, AttendanceRecord, NewUser, PointsEntry, SignupOutcome, User},
};

/// Storage operations for members and their ledger
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Whether any member already owns this referral code
    async fn referral_code_exists(&self, code: &str) -> AppResult<bool>;

    /// Insert a member and, if `referral_code` names an existing member,
    /// credit that referrer with `reward` points in the same transaction.
    async fn create_with_referral(
        &self,
        new_user: NewUser,
        referral_code: Option<String>,
        reward: i64,
    ) -> AppResult<SignupOutcome>;

    /// Append an attendance record and bump `points` and `days_attended`.
    /// Returns `None` when the user does not exist.
    async fn record_attendance(
        &self,
        user_id: Uuid,
        duration_minutes: i32,
        points: i64,
    ) -> AppResult<Option<AttendanceOutcome>>;

    /// Add `delta` to the balance and log it. Returns the new balance, or
    /// `None` when the user does not exist.
    async fn adjust_points(&self, user_id: Uuid, delta: i64, reason: &str)
    -> AppResult<Option<i64>>;

    /// Attendance history, newest first
    async fn list_attendance(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> AppResult<Vec<AttendanceRecord>>;

    /// Points history, newest first
    async fn list_points_history(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<PointsEntry>>;

    /// List users with pagination, optionally filtered by name or email
    async fn list(
        &self,
        offset: i64,
        limit: i64,
        search: Option<String>,
    ) -> AppResult<(Vec<User>, i64)>;

    /// Update user role
    async fn update_role(&self, user_id: Uuid, role: &str) -> AppResult<Option<User>>;

    /// Update last login time
    async fn update_last_login(&self, user_id: Uuid) -> AppResult<()>;
}

/// PostgreSQL implementation of [`UserRepository`]
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// `ILIKE` pattern matching `search` literally anywhere in the column
fn contains_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE email = $1"#)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn referral_code_exists(&self, code: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar(r#"SELECT EXISTS (SELECT 1 FROM users WHERE referral_code = $1)"#)
                .bind(code)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn create_with_referral(
        &self,
        new_user: NewUser,
        referral_code: Option<String>,
        reward: i64,
    ) -> AppResult<SignupOutcome> {
        let mut tx = self.pool.begin().await?;

        // Lock the referrer so the credit lands exactly once
        let referrer_id = match referral_code.as_deref() {
            Some(code) => {
                sqlx::query_scalar::<_, Uuid>(
                    r#"SELECT id FROM users WHERE referral_code = $1 FOR UPDATE"#,
                )
                .bind(code)
                .fetch_optional(&mut *tx)
                .await?
            }
            None => None,
        };

        let referred_by = referrer_id.and(referral_code);

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, phone, age, password_hash, role, referral_code, referred_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.phone)
        .bind(new_user.age)
        .bind(&new_user.password_hash)
        .bind(&new_user.role)
        .bind(&new_user.referral_code)
        .bind(&referred_by)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(referrer_id) = referrer_id {
            sqlx::query(
                r#"
                UPDATE users
                SET points = points + $2, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(referrer_id)
            .bind(reward)
            .execute(&mut *tx)
            .await?;

            sqlx::query(
                r#"INSERT INTO points_history (user_id, delta, reason) VALUES ($1, $2, $3)"#,
            )
            .bind(referrer_id)
            .bind(reward)
            .bind(reasons::REFERRAL)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(SignupOutcome { user, referrer_id })
    }

    async fn record_attendance(
        &self,
        user_id: Uuid,
        duration_minutes: i32,
        points: i64,
    ) -> AppResult<Option<AttendanceOutcome>> {
        let mut tx = self.pool.begin().await?;

        // The row lock taken here serializes concurrent sessions for one member
        let counters = sqlx::query_as::<_, (i64, i32)>(
            r#"
            UPDATE users
            SET points = points + $2, days_attended = days_attended + 1, updated_at = NOW()
            WHERE id = $1
            RETURNING points, days_attended
            "#,
        )
        .bind(user_id)
        .bind(points)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((points_total, days_attended)) = counters else {
            tx.rollback().await?;
            return Ok(None);
        };

        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            INSERT INTO attendance_records (user_id, duration_minutes, active)
            VALUES ($1, $2, TRUE)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(duration_minutes)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(r#"INSERT INTO points_history (user_id, delta, reason) VALUES ($1, $2, $3)"#)
            .bind(user_id)
            .bind(points)
            .bind(reasons::ATTENDANCE)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(AttendanceOutcome {
            record,
            points: points_total,
            days_attended,
        }))
    }

    async fn adjust_points(
        &self,
        user_id: Uuid,
        delta: i64,
        reason: &str,
    ) -> AppResult<Option<i64>> {
        let mut tx = self.pool.begin().await?;

        let balance = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE users
            SET points = points + $2, updated_at = NOW()
            WHERE id = $1
            RETURNING points
            "#,
        )
        .bind(user_id)
        .bind(delta)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(balance) = balance else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(r#"INSERT INTO points_history (user_id, delta, reason) VALUES ($1, $2, $3)"#)
            .bind(user_id)
            .bind(delta)
            .bind(reason)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(balance))
    }

    async fn list_attendance(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> AppResult<Vec<AttendanceRecord>> {
        // LIMIT NULL means no limit in PostgreSQL
        let records = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT * FROM attendance_records
            WHERE user_id = $1
            ORDER BY attended_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn list_points_history(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<PointsEntry>> {
        let entries = sqlx::query_as::<_, PointsEntry>(
            r#"
            SELECT * FROM points_history
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn list(
        &self,
        offset: i64,
        limit: i64,
        search: Option<String>,
    ) -> AppResult<(Vec<User>, i64)> {
        let search_pattern = search.as_deref().map(contains_pattern);

        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\' OR email ILIKE $1 ESCAPE '\')
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(&search_pattern)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM users
            WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\' OR email ILIKE $1 ESCAPE '\')
            "#,
        )
        .bind(&search_pattern)
        .fetch_one(&self.pool)
        .await?;

        Ok((users, count))
    }

    async fn update_role(&self, user_id: Uuid, role: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET role = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_last_login(&self, user_id: Uuid) -> AppResult<()> {
        sqlx::query(r#"UPDATE users SET last_login_at = NOW(), updated_at = NOW() WHERE id = $1"#)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
