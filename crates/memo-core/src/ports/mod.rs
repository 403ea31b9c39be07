//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;
mod sanitizer;

pub use auth::{AuthError, TokenClaims, TokenService};
pub use repository::{BaseRepository, PostRepository};
pub use sanitizer::HtmlSanitizer;
