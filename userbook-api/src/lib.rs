//! # userbook API Server Library
//!
//! REST endpoints for managing users held in an in-memory store.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Security headers
//! - `routes`: Route tables, handlers, and the OpenAPI document

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
