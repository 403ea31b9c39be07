//! # Memo Infrastructure
//!
//! Concrete implementations of the ports defined in `memo-core`.
//! This crate contains the post stores, the HTML sanitizer and token validation.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory store only
//! - `postgres` - PostgreSQL post store via SeaORM

pub mod auth;
pub mod database;
pub mod sanitize;

pub use auth::{JwtConfig, JwtTokenService};
pub use database::{DatabaseConnections, InMemoryPostRepository};
pub use sanitize::{AmmoniaSanitizer, SanitizePolicy};

#[cfg(feature = "postgres")]
pub use database::PostgresPostRepository;
