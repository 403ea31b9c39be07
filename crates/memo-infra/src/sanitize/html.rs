use std::collections::{HashMap, HashSet};

use ammonia::Builder;

use memo_core::ports::HtmlSanitizer;

/// Allow-list applied to post bodies.
#[derive(Debug, Clone)]
pub struct SanitizePolicy {
    pub tags: Vec<&'static str>,
    pub tag_attributes: Vec<(&'static str, Vec<&'static str>)>,
    pub url_schemes: Vec<&'static str>,
}

impl SanitizePolicy {
    /// Policy for rich-text post bodies.
    pub fn post_body() -> Self {
        Self {
            tags: vec![
                "h1",
                "h2",
                "b",
                "i",
                "u",
                "s",
                "p",
                "ul",
                "ol",
                "li",
                "blockquote",
                "a",
                "img",
            ],
            tag_attributes: vec![
                ("a", vec!["href", "name", "target"]),
                ("img", vec!["src"]),
                ("li", vec!["class"]),
            ],
            url_schemes: vec!["data", "http"],
        }
    }
}

impl Default for SanitizePolicy {
    fn default() -> Self {
        Self::post_body()
    }
}

/// Sanitizer holding two prebuilt ammonia cleaners: one for the policy, one
/// that removes every tag.
///
/// Contents of `script` and `style` are dropped, not unwrapped.
pub struct AmmoniaSanitizer {
    cleaner: Builder<'static>,
    stripper: Builder<'static>,
}

impl AmmoniaSanitizer {
    pub fn new(policy: SanitizePolicy) -> Self {
        let tag_attributes: HashMap<&'static str, HashSet<&'static str>> = policy
            .tag_attributes
            .into_iter()
            .map(|(tag, attrs)| (tag, attrs.into_iter().collect()))
            .collect();

        let mut cleaner = Builder::default();
        cleaner
            .tags(policy.tags.into_iter().collect())
            .tag_attributes(tag_attributes)
            .generic_attributes(HashSet::new())
            .url_schemes(policy.url_schemes.into_iter().collect())
            .link_rel(None);

        let mut stripper = Builder::default();
        stripper
            .tags(HashSet::new())
            .tag_attributes(HashMap::new())
            .generic_attributes(HashSet::new());

        Self { cleaner, stripper }
    }
}

impl Default for AmmoniaSanitizer {
    fn default() -> Self {
        Self::new(SanitizePolicy::default())
    }
}

impl HtmlSanitizer for AmmoniaSanitizer {
    fn clean(&self, html: &str) -> String {
        self.cleaner.clean(html).to_string()
    }

    /// Text content with markup removed. The result stays HTML-escaped.
    fn strip(&self, html: &str) -> String {
        self.stripper.clean(html).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitizer() -> AmmoniaSanitizer {
        AmmoniaSanitizer::default()
    }

    #[test]
    fn test_script_is_removed_with_its_content() {
        let cleaned = sanitizer().clean("<script>x</script><b>ok</b>");
        assert_eq!(cleaned, "<b>ok</b>");
    }

    #[test]
    fn test_unlisted_tags_are_unwrapped() {
        let cleaned = sanitizer().clean("<div><p>keep <span>text</span></p></div>");
        assert_eq!(cleaned, "<p>keep text</p>");
    }

    #[test]
    fn test_attributes_follow_allow_list() {
        let cleaned = sanitizer()
            .clean(r#"<a href="http://example.com" onclick="steal()" target="_blank">link</a>"#);
        assert_eq!(
            cleaned,
            r#"<a href="http://example.com" target="_blank">link</a>"#
        );

        let cleaned = sanitizer().clean(r#"<ul><li class="done" id="x">a</li></ul>"#);
        assert_eq!(cleaned, r#"<ul><li class="done">a</li></ul>"#);
    }

    #[test]
    fn test_disallowed_schemes_are_dropped() {
        let cleaned = sanitizer().clean(r#"<a href="javascript:alert(1)">x</a>"#);
        assert_eq!(cleaned, "<a>x</a>");

        let cleaned = sanitizer().clean(r#"<img src="data:image/png;base64,AAAA">"#);
        assert!(cleaned.contains(r#"src="data:image/png;base64,AAAA""#));
    }

    #[test]
    fn test_strip_keeps_only_text() {
        let stripped = sanitizer().strip("<h1>Title</h1><p>Hello <b>world</b></p>");
        assert_eq!(stripped, "TitleHello world");
    }

    #[test]
    fn test_strip_output_stays_escaped() {
        let stripped = sanitizer().strip("<p>Tom & Jerry</p>");
        assert_eq!(stripped, "Tom &amp; Jerry");

        // Entities count toward the excerpt limit as written.
        let html = format!("<p>{}&</p>", "a".repeat(195));
        let excerpt = sanitizer().excerpt(&html);
        assert_eq!(excerpt, format!("{}&amp;", "a".repeat(195)));

        let html = format!("<p>{}&</p>", "a".repeat(196));
        let excerpt = sanitizer().excerpt(&html);
        assert_eq!(excerpt, format!("{}&amp...", "a".repeat(196)));
    }

    #[test]
    fn test_excerpt_strips_then_shortens() {
        let html = format!("<p>{}</p>", "z".repeat(250));
        let excerpt = sanitizer().excerpt(&html);
        assert_eq!(excerpt, format!("{}...", "z".repeat(200)));
    }
}
