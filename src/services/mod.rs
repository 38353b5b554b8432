//! Business logic services

pub mod admin_service;
pub mod auth_service;
pub mod ledger_service;
pub mod referral_service;
pub mod user_service;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use ledger_service::LedgerService;
pub use referral_service::ReferralService;
pub use user_service::UserService;
