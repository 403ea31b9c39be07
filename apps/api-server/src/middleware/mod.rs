//! Middleware modules.

pub mod auth;
pub mod error;
pub mod ownership;
pub mod post_loader;

pub use ownership::OwnershipGuard;
pub use post_loader::PostLoader;
