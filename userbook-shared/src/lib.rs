//! # userbook shared library
//!
//! Types and storage shared by the userbook API server.
//!
//! ## Module Organization
//!
//! - `models`: The `User` record and its validation rules
//! - `store`: The `UserStore` trait and the sharded in-memory store

pub mod models;
pub mod store;

/// Current version of the userbook shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
