//! Yoga Life - Membership Service
//!
//! This library provides the core functionality for the Yoga Life studio
//! membership backend.
//!
//! # Features
//!
//! - Member signup with referral codes and referral rewards
//! - Session-based authentication with revocable cookie sessions
//! - Attendance tracking with points and milestone badges
//! - Admin tools for member listing, role changes and point adjustments
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database and session store access
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
