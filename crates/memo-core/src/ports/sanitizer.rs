//! HTML sanitization port.

use crate::domain::shorten;

/// Allow-list HTML sanitizer.
///
/// Implementations hold an immutable policy built once at startup.
pub trait HtmlSanitizer: Send + Sync {
    /// Remove every tag, attribute and URL scheme outside the policy.
    fn clean(&self, html: &str) -> String;

    /// Remove all markup, keeping only text.
    fn strip(&self, html: &str) -> String;

    /// Plain-text, length-bounded summary used in listings.
    fn excerpt(&self, html: &str) -> String {
        shorten(&self.strip(html))
    }
}
