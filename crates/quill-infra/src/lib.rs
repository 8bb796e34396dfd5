//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains database, sanitization, file storage and auth integrations.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//!
//! Without `postgres` only the in-memory repositories are available.

pub mod auth;
pub mod database;
pub mod sanitizer;
pub mod storage;

// Re-exports - In-Memory
pub use database::{InMemoryPostRepository, InMemoryUserRepository};

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use sanitizer::AmmoniaSanitizer;
pub use storage::LocalImageStore;

pub use database::DatabaseConfig;
#[cfg(feature = "postgres")]
pub use database::DatabaseConnections;
