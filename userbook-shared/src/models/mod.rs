//! Data models for userbook
//!
//! # Models
//!
//! - `user`: User records keyed by email address

pub mod user;

pub use user::User;
