//! Social API service
//!
//! Users, posts, comments, and follows over Postgres, gated by a session and
//! authorization core: password-credential verification, signed session
//! tokens, multi-device session tracking with selective and bulk revocation,
//! per-request identity resolution, and ownership/role/paid-based
//! authorization predicates.
//!
//! # Modules
//!
//! - `authz`: resolved identity and the pure authorization predicates
//! - `config`: environment-driven configuration
//! - `db`: store traits and Postgres repositories
//! - `error`: error taxonomy and HTTP mapping
//! - `handlers`: HTTP request handlers
//! - `middleware`: bearer-token extraction
//! - `models`: users, posts, comments, and the `Lifecycle` capability
//! - `security`: password hashing and token hashing
//! - `services`: business logic, including the authentication core

pub mod authz;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod security;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
