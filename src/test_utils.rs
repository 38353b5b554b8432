//! In-memory stores, container fixtures and helpers shared by unit tests

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    config::{Config, DatabaseConfig, LogFormat, RedisConfig, ServerConfig, SessionConfig},
    constants::{reasons, roles},
    db::repositories::{SessionStore, UserRepository},
    error::{AppError, AppResult},
    models::{AttendanceOutcome, AttendanceRecord, NewUser, PointsEntry, SignupOutcome, User},
    state::AppState,
};

#[derive(Default)]
struct Ledger {
    /// Insertion order doubles as creation order
    users: Vec<User>,
    attendance: Vec<AttendanceRecord>,
    history: Vec<PointsEntry>,
}

impl Ledger {
    fn user_mut(&mut self, id: Uuid) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    fn log_points(&mut self, user_id: Uuid, delta: i64, reason: &str) {
        self.history.push(PointsEntry {
            id: Uuid::new_v4(),
            user_id,
            delta,
            reason: reason.to_string(),
            created_at: Utc::now(),
        });
    }
}

/// [`UserRepository`] backed by a mutex-guarded vector
#[derive(Default)]
pub struct MemoryUserRepository {
    ledger: Mutex<Ledger>,
}

impl MemoryUserRepository {
    pub async fn get(&self, id: Uuid) -> Option<User> {
        self.ledger.lock().await.users.iter().find(|u| u.id == id).cloned()
    }

    /// Attendance records in insertion order
    pub async fn attendance_of(&self, id: Uuid) -> Vec<AttendanceRecord> {
        let ledger = self.ledger.lock().await;
        ledger.attendance.iter().filter(|r| r.user_id == id).cloned().collect()
    }

    /// Points history in insertion order
    pub async fn history_of(&self, id: Uuid) -> Vec<PointsEntry> {
        let ledger = self.ledger.lock().await;
        ledger.history.iter().filter(|e| e.user_id == id).cloned().collect()
    }

    /// Overwrite counters directly, as a manual correction would
    pub async fn set_counters(&self, id: Uuid, days_attended: i32, points: i64) {
        let mut ledger = self.ledger.lock().await;
        if let Some(user) = ledger.user_mut(id) {
            user.days_attended = days_attended;
            user.points = points;
        }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.get(id).await)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let ledger = self.ledger.lock().await;
        Ok(ledger.users.iter().find(|u| u.email == email).cloned())
    }

    async fn referral_code_exists(&self, code: &str) -> AppResult<bool> {
        let ledger = self.ledger.lock().await;
        Ok(ledger.users.iter().any(|u| u.referral_code == code))
    }

    async fn create_with_referral(
        &self,
        new_user: NewUser,
        referral_code: Option<String>,
        reward: i64,
    ) -> AppResult<SignupOutcome> {
        let mut ledger = self.ledger.lock().await;

        // Same outcomes as the unique constraints on `users`
        if ledger.users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::AlreadyExists(
                "User with this email already exists".to_string(),
            ));
        }
        if ledger.users.iter().any(|u| u.referral_code == new_user.referral_code) {
            return Err(AppError::Conflict(
                "Referral code already taken, please retry".to_string(),
            ));
        }

        let referrer_id = referral_code.as_deref().and_then(|code| {
            ledger
                .users
                .iter()
                .find(|u| u.referral_code == code)
                .map(|u| u.id)
        });

        let mut user = user_from(new_user);
        user.referred_by = referrer_id.and(referral_code);
        ledger.users.push(user.clone());

        if let Some(referrer_id) = referrer_id {
            if let Some(referrer) = ledger.user_mut(referrer_id) {
                referrer.points += reward;
            }
            ledger.log_points(referrer_id, reward, reasons::REFERRAL);
        }

        Ok(SignupOutcome { user, referrer_id })
    }

    async fn record_attendance(
        &self,
        user_id: Uuid,
        duration_minutes: i32,
        points: i64,
    ) -> AppResult<Option<AttendanceOutcome>> {
        let mut ledger = self.ledger.lock().await;

        let Some(user) = ledger.user_mut(user_id) else {
            return Ok(None);
        };
        user.points += points;
        user.days_attended += 1;
        let (points_total, days_attended) = (user.points, user.days_attended);

        let record = AttendanceRecord {
            id: Uuid::new_v4(),
            user_id,
            attended_at: Utc::now(),
            duration_minutes,
            active: true,
        };
        ledger.attendance.push(record.clone());
        ledger.log_points(user_id, points, reasons::ATTENDANCE);

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
        let mut ledger = self.ledger.lock().await;

        let Some(user) = ledger.user_mut(user_id) else {
            return Ok(None);
        };
        user.points += delta;
        let balance = user.points;
        ledger.log_points(user_id, delta, reason);

        Ok(Some(balance))
    }

    async fn list_attendance(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> AppResult<Vec<AttendanceRecord>> {
        let ledger = self.ledger.lock().await;
        let limit = limit.map_or(usize::MAX, |l| l.max(0) as usize);

        Ok(ledger
            .attendance
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_points_history(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<PointsEntry>> {
        let ledger = self.ledger.lock().await;

        Ok(ledger
            .history
            .iter()
            .rev()
            .filter(|e| e.user_id == user_id)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn list(
        &self,
        offset: i64,
        limit: i64,
        search: Option<String>,
    ) -> AppResult<(Vec<User>, i64)> {
        let ledger = self.ledger.lock().await;
        let needle = search.map(|s| s.to_lowercase());

        let matching: Vec<&User> = ledger
            .users
            .iter()
            .rev()
            .filter(|u| match &needle {
                Some(n) => u.name.to_lowercase().contains(n) || u.email.to_lowercase().contains(n),
                None => true,
            })
            .collect();

        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn update_role(&self, user_id: Uuid, role: &str) -> AppResult<Option<User>> {
        let mut ledger = self.ledger.lock().await;

        Ok(ledger.user_mut(user_id).map(|user| {
            user.role = role.to_string();
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn update_last_login(&self, user_id: Uuid) -> AppResult<()> {
        let mut ledger = self.ledger.lock().await;
        if let Some(user) = ledger.user_mut(user_id) {
            user.last_login_at = Some(Utc::now());
        }
        Ok(())
    }
}

/// [`SessionStore`] keeping live session ids in a map
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, Uuid>>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, session_id: &str, user_id: Uuid, _ttl_seconds: i64) -> AppResult<()> {
        self.sessions
            .lock()
            .await
            .insert(session_id.to_string(), user_id);
        Ok(())
    }

    async fn is_active(&self, session_id: &str) -> AppResult<bool> {
        Ok(self.sessions.lock().await.contains_key(session_id))
    }

    async fn revoke(&self, session_id: &str) -> AppResult<()> {
        self.sessions.lock().await.remove(session_id);
        Ok(())
    }

    async fn revoke_all(&self, user_id: Uuid) -> AppResult<()> {
        self.sessions.lock().await.retain(|_, owner| *owner != user_id);
        Ok(())
    }
}

pub fn new_user(name: &str, email: &str, referral_code: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.to_string(),
        phone: "+91 98765 43210".to_string(),
        age: 30,
        password_hash: "$argon2id$placeholder".to_string(),
        role: roles::MEMBER.to_string(),
        referral_code: referral_code.to_string(),
    }
}

/// Materialize a fresh member row the way the database defaults would
pub fn user_from(new_user: NewUser) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        name: new_user.name,
        email: new_user.email,
        phone: new_user.phone,
        age: new_user.age,
        password_hash: new_user.password_hash,
        role: new_user.role,
        points: 0,
        days_attended: 0,
        referral_code: new_user.referral_code,
        referred_by: None,
        last_login_at: None,
        created_at: now,
        updated_at: now,
    }
}

/// Insert a member with no referrer
pub async fn seed_member(
    repo: &MemoryUserRepository,
    name: &str,
    email: &str,
    referral_code: &str,
) -> User {
    repo.create_with_referral(new_user(name, email, referral_code), None, 0)
        .await
        .expect("seed member")
        .user
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            log_format: LogFormat::Pretty,
        },
        database: DatabaseConfig {
            url: "postgres://localhost/yogalife_test".to_string(),
            max_connections: 1,
        },
        redis: RedisConfig {
            url: "redis://localhost:6379".to_string(),
        },
        session: SessionConfig {
            secret: "test-secret-test-secret-test-secret".to_string(),
            expiry_hours: 1,
            cookie_name: "auth".to_string(),
            cookie_secure: false,
        },
    }
}

/// Application state over in-memory stores, returning the stores for inspection
pub fn test_state() -> (AppState, Arc<MemoryUserRepository>, Arc<MemorySessionStore>) {
    let users = Arc::new(MemoryUserRepository::default());
    let sessions = Arc::new(MemorySessionStore::default());
    let state = AppState::new(users.clone(), sessions.clone(), test_config());
    (state, users, sessions)
}

/// PostgreSQL and Redis containers, started on first use and shared by every
/// test in the binary. Requires a local Docker daemon.
pub mod containers {
    use sqlx::PgPool;
    use testcontainers::{runners::AsyncRunner, ContainerAsync, Image};
    use testcontainers_modules::{postgres::Postgres, redis::Redis};
    use tokio::sync::OnceCell;

    use crate::{
        config::RedisConfig,
        db::{self, repositories::RedisSessionStore},
    };

    struct Running<I: Image> {
        _container: ContainerAsync<I>,
        url: String,
    }

    static POSTGRES: OnceCell<Running<Postgres>> = OnceCell::const_new();
    static REDIS: OnceCell<Running<Redis>> = OnceCell::const_new();

    /// Connection URL of the shared, migrated PostgreSQL container
    pub async fn postgres_url() -> &'static str {
        let running = POSTGRES
            .get_or_init(|| async {
                let container = Postgres::default()
                    .with_user("yogalife")
                    .with_password("yogalife_test")
                    .with_db_name("yogalife_test")
                    .start()
                    .await
                    .expect("Failed to start PostgreSQL container");

                let host = container.get_host().await.expect("container host");
                let port = container
                    .get_host_port_ipv4(5432)
                    .await
                    .expect("container port");
                let url = format!(
                    "postgres://yogalife:yogalife_test@{}:{}/yogalife_test",
                    host, port
                );

                let pool = PgPool::connect(&url)
                    .await
                    .expect("Failed to connect to test database");
                db::run_migrations(&pool)
                    .await
                    .expect("Failed to run migrations");
                pool.close().await;

                Running {
                    _container: container,
                    url,
                }
            })
            .await;

        &running.url
    }

    /// Connection URL of the shared Redis container
    pub async fn redis_url() -> &'static str {
        let running = REDIS
            .get_or_init(|| async {
                let container = Redis::default()
                    .start()
                    .await
                    .expect("Failed to start Redis container");

                let host = container.get_host().await.expect("container host");
                let port = container
                    .get_host_port_ipv4(6379)
                    .await
                    .expect("container port");

                Running {
                    _container: container,
                    url: format!("redis://{}:{}", host, port),
                }
            })
            .await;

        &running.url
    }

    /// Fresh pool on the calling test's runtime
    pub async fn pg_pool() -> PgPool {
        PgPool::connect(postgres_url().await)
            .await
            .expect("Failed to connect to test database")
    }

    pub async fn session_store() -> RedisSessionStore {
        let config = RedisConfig {
            url: redis_url().await.to_string(),
        };
        let conn = db::create_redis(&config)
            .await
            .expect("Failed to connect to test Redis");
        RedisSessionStore::new(conn)
    }
}
