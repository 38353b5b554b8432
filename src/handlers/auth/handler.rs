//! Authentication handler implementations

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::{
        extract::{AppJson, AppQuery},
        users::response::UserResponse,
    },
    middleware::auth::AuthenticatedUser,
    services::{auth_service::SignupInput, AuthService},
    state::AppState,
    utils::cookie::{clear_cookie, session_cookie},
};

use super::{
    request::{LoginRequest, LogoutQuery, SignupRequest},
    response::{LoginResponse, LogoutResponse, SignupResponse},
};

/// Register a new member
pub async fn signup(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<SignupResponse>)> {
    // Validate request
    payload.validate()?;

    let outcome = AuthService::signup(
        state.users(),
        SignupInput {
            name: &payload.name,
            email: &payload.email,
            phone: &payload.phone,
            age: payload.age,
            password: &payload.password,
            referred_by: payload.referred_by.as_deref(),
        },
    )
    .await?;

    let response = SignupResponse {
        message: "User created successfully".to_string(),
        user_id: outcome.user.id,
        referral_code: outcome.user.referral_code,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with email and password
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    // Validate request
    payload.validate()?;

    let session_config = &state.config().session;
    let (user, session) = AuthService::login(
        state.users(),
        state.sessions(),
        session_config,
        &payload.email,
        &payload.password,
    )
    .await?;

    let cookie = session_cookie(
        &session_config.cookie_name,
        &session.token,
        session.expires_in,
        session_config.cookie_secure,
    );

    let response = LoginResponse {
        message: "Login successful".to_string(),
        is_admin: user.is_admin(),
        user: UserResponse::from(user),
        token: session.token,
        expires_in: session.expires_in,
    };

    Ok(([(SET_COOKIE, cookie)], Json(response)))
}

/// Logout (revoke the session and clear the cookie)
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppQuery(query): AppQuery<LogoutQuery>,
) -> AppResult<impl IntoResponse> {
    AuthService::logout(
        state.sessions(),
        auth_user.id,
        &auth_user.session_id,
        query.all_sessions.unwrap_or(false),
    )
    .await?;

    let session_config = &state.config().session;
    let cookie = clear_cookie(&session_config.cookie_name, session_config.cookie_secure);

    Ok((
        [(SET_COOKIE, cookie)],
        Json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        }),
    ))
}
