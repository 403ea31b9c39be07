//! HTML sanitization backed by ammonia.

mod html;

pub use html::{AmmoniaSanitizer, SanitizePolicy};
