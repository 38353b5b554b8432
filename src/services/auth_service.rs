//! Authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    config::SessionConfig,
    constants::roles,
    db::repositories::{SessionStore, UserRepository},
    error::{AppError, AppResult},
    models::{NewUser, SignupOutcome, User},
    services::{LedgerService, ReferralService},
    utils::{generate_session_id, normalize_email, validation::sanitize_string},
};

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub role: String,
    /// Session id, must still be live in the session store
    pub jti: String,
    pub exp: i64,
    pub iat: i64,
}

/// Signup form after request validation
#[derive(Debug, Clone)]
pub struct SignupInput<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub age: i32,
    pub password: &'a str,
    pub referred_by: Option<&'a str>,
}

/// A freshly issued session
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub session_id: String,
    pub expires_in: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new member, crediting their referrer if the code resolves
    pub async fn signup(users: &dyn UserRepository, input: SignupInput<'_>) -> AppResult<SignupOutcome> {
        let email = normalize_email(input.email);
        let name = sanitize_string(input.name);

        // Check if email exists
        if users.find_by_email(&email).await?.is_some() {
            return Err(AppError::AlreadyExists(
                "User with this email already exists".to_string(),
            ));
        }

        // Hash password
        let password_hash = Self::hash_password(input.password)?;

        let referral_code =
            ReferralService::unique_code(users, &name, ReferralService::random_suffix).await?;

        let new_user = NewUser {
            name,
            email,
            phone: input.phone.trim().to_string(),
            age: input.age,
            password_hash,
            role: roles::MEMBER.to_string(),
            referral_code,
        };

        let outcome = LedgerService::enroll_with_referral(users, new_user, input.referred_by).await?;

        info!(user_id = %outcome.user.id, "Member signed up");

        Ok(outcome)
    }

    /// Login with email and password, opening a new session
    pub async fn login(
        users: &dyn UserRepository,
        sessions: &dyn SessionStore,
        config: &SessionConfig,
        email: &str,
        password: &str,
    ) -> AppResult<(User, IssuedSession)> {
        // Find user
        let user = users
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        // Verify password
        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        // Update last login
        users.update_last_login(user.id).await?;

        let session = Self::issue_session(&user, config)?;
        sessions
            .create(&session.session_id, user.id, session.expires_in)
            .await?;

        info!(user_id = %user.id, role = %user.role, "Member logged in");

        Ok((user, session))
    }

    /// Logout (revoke the current session, or every session of the user)
    pub async fn logout(
        sessions: &dyn SessionStore,
        user_id: Uuid,
        session_id: &str,
        all_sessions: bool,
    ) -> AppResult<()> {
        if all_sessions {
            sessions.revoke_all(user_id).await?;
        } else {
            sessions.revoke(session_id).await?;
        }

        info!(user_id = %user_id, all_sessions, "Member logged out");

        Ok(())
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Sign a session token for `user`
    pub fn issue_session(user: &User, config: &SessionConfig) -> AppResult<IssuedSession> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(config.expiry_hours);
        let session_id = generate_session_id();

        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role.clone(),
            jti: session_id.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok(IssuedSession {
            token,
            session_id,
            expires_in: config.ttl_seconds(),
        })
    }

    /// Hash password using Argon2
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
