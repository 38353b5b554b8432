//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod attendance;
pub mod badge;
pub mod points;
pub mod user;

pub use attendance::*;
pub use badge::*;
pub use points::*;
pub use user::*;
