//! Referral code generation

use tracing::debug;

use crate::{
    constants::{
        MAX_REFERRAL_CODE_ATTEMPTS, REFERRAL_FALLBACK_PREFIX, REFERRAL_PREFIX_LENGTH,
        REFERRAL_SUFFIX_LENGTH,
    },
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    utils::crypto::{random_string, BASE36},
};

/// Builds shareable referral codes such as `ASHAK7Q2M`
pub struct ReferralService;

impl ReferralService {
    /// Name prefix (up to five alphanumerics, uppercased) followed by `suffix`
    pub fn generate_code(name: &str, suffix: &str) -> String {
        let prefix: String = name
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_uppercase)
            .take(REFERRAL_PREFIX_LENGTH)
            .collect();

        let prefix = if prefix.is_empty() {
            REFERRAL_FALLBACK_PREFIX.to_string()
        } else {
            prefix
        };

        format!("{}{}", prefix, suffix.to_uppercase())
    }

    /// Random base-36 suffix
    pub fn random_suffix() -> String {
        random_string(BASE36, REFERRAL_SUFFIX_LENGTH)
    }

    /// Generate a code no existing member owns, drawing suffixes from
    /// `next_suffix` until one is free.
    pub async fn unique_code<F>(
        users: &dyn UserRepository,
        name: &str,
        mut next_suffix: F,
    ) -> AppResult<String>
    where
        F: FnMut() -> String + Send,
    {
        for attempt in 1..=MAX_REFERRAL_CODE_ATTEMPTS {
            let code = Self::generate_code(name, &next_suffix());

            if !users.referral_code_exists(&code).await? {
                return Ok(code);
            }

            debug!(attempt, code = %code, "Referral code collision, regenerating");
        }

        Err(AppError::Conflict(
            "Could not generate a unique referral code".to_string(),
        ))
    }
}
