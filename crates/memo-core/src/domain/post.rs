use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Snapshot of the authoring user, taken when the post is created.
///
/// Not re-synced when the user record changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAuthor {
    pub id: Uuid,
    pub username: String,
}

/// Post entity - a blog post with a sanitized HTML body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub user: PostAuthor,
}

impl Post {
    /// Create a new post with a time-ordered id.
    ///
    /// `body` is stored as given; callers sanitize it first.
    pub fn new(title: String, body: String, tags: Vec<String>, user: PostAuthor) -> Self {
        Self {
            id: Uuid::now_v7(),
            title,
            body,
            tags,
            user,
        }
    }

    /// Parse a store identifier taken from a request path.
    pub fn parse_id(raw: &str) -> Result<Uuid, DomainError> {
        Uuid::parse_str(raw).map_err(|_| DomainError::InvalidIdentifier(raw.to_string()))
    }

    /// Creation time, recovered from the v7 id.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let (secs, nanos) = self.id.get_timestamp()?.to_unix();
        DateTime::from_timestamp(secs as i64, nanos)
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user.id == user_id
    }

    /// Merge the supplied fields of `patch` into this post.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(body) = patch.body {
            self.body = body;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
    }
}

/// Partial update of a post. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.tags.is_none()
    }
}

/// Listing filter. A `None` key adds no constraint at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub tag: Option<String>,
    pub username: Option<String>,
}

impl PostFilter {
    /// Build a filter from raw query values, treating empty strings as absent.
    pub fn new(tag: Option<String>, username: Option<String>) -> Self {
        Self {
            tag: tag.filter(|t| !t.is_empty()),
            username: username.filter(|u| !u.is_empty()),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.tag.is_none() && self.username.is_none()
    }

    pub fn matches(&self, post: &Post) -> bool {
        let tag_ok = self
            .tag
            .as_ref()
            .is_none_or(|tag| post.tags.iter().any(|t| t == tag));
        let user_ok = self
            .username
            .as_ref()
            .is_none_or(|username| &post.user.username == username);

        tag_ok && user_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(name: &str) -> PostAuthor {
        PostAuthor {
            id: Uuid::new_v4(),
            username: name.to_string(),
        }
    }

    fn post_with(tags: &[&str], username: &str) -> Post {
        Post::new(
            "Title".to_string(),
            "<p>Body</p>".to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
            author(username),
        )
    }

    #[test]
    fn test_new_posts_sort_by_creation() {
        let first = post_with(&[], "alice");
        let second = post_with(&[], "alice");
        assert!(second.id > first.id);
        assert!(first.created_at().is_some());
    }

    #[test]
    fn test_parse_id_rejects_malformed_input() {
        let id = Uuid::now_v7();
        assert_eq!(Post::parse_id(&id.to_string()).unwrap(), id);

        for raw in ["", "42", "not-a-uuid", "5f1d7c3e9b1e8a0017d4c2b1"] {
            assert!(matches!(
                Post::parse_id(raw),
                Err(DomainError::InvalidIdentifier(r)) if r == raw
            ));
        }
    }

    #[test]
    fn test_ownership_compares_author_id() {
        let post = post_with(&[], "alice");
        assert!(post.is_owned_by(post.user.id));
        assert!(!post.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn test_apply_merges_only_supplied_fields() {
        let mut post = post_with(&["rust"], "alice");
        let original_body = post.body.clone();

        post.apply(PostPatch {
            title: Some("New title".to_string()),
            body: None,
            tags: Some(vec![]),
        });

        assert_eq!(post.title, "New title");
        assert_eq!(post.body, original_body);
        assert!(post.tags.is_empty());
        assert_eq!(post.user.username, "alice");
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = PostFilter::new(None, Some(String::new()));
        assert!(filter.is_unconstrained());
        assert!(filter.matches(&post_with(&[], "bob")));
        assert!(filter.matches(&post_with(&["x"], "alice")));
    }

    #[test]
    fn test_filter_combines_tag_and_username() {
        let filter = PostFilter::new(Some("rust".to_string()), Some("alice".to_string()));
        assert!(filter.matches(&post_with(&["web", "rust"], "alice")));
        assert!(!filter.matches(&post_with(&["rust"], "bob")));
        assert!(!filter.matches(&post_with(&["rusty"], "alice")));
    }
}
