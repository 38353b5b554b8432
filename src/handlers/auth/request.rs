//! Authentication request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{
        MAX_AGE, MAX_NAME_LENGTH, MAX_PASSWORD_LENGTH, MAX_REFERRAL_CODE_LENGTH, MIN_AGE,
        MIN_PASSWORD_LENGTH,
    },
    utils::validation::{validate_not_blank, validate_phone},
};

/// Member signup request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(
        length(min = 1, max = MAX_NAME_LENGTH),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(range(min = MIN_AGE, max = MAX_AGE))]
    pub age: i32,

    #[validate(length(min = MIN_PASSWORD_LENGTH, max = MAX_PASSWORD_LENGTH))]
    pub password: String,

    /// Referral code of the member who invited them
    #[validate(length(max = MAX_REFERRAL_CODE_LENGTH))]
    pub referred_by: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Logout options
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutQuery {
    /// Revoke every session of the member, not just this one
    pub all_sessions: Option<bool>,
}
