//! In-memory post store - used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use memo_core::domain::{PageRequest, Post, PostFilter, PostPatch};
use memo_core::error::RepoError;
use memo_core::ports::{BaseRepository, PostRepository};

/// In-memory post store keyed by id.
///
/// Ids are time-ordered, so iterating the map backwards yields newest first.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<BTreeMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if posts.contains_key(&post.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        Ok(self.posts.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        // An offset past usize::MAX skips everything anyway.
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);

        Ok(posts
            .values()
            .rev()
            .filter(|post| filter.matches(post))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.values().filter(|post| filter.matches(post)).count() as u64)
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.get_mut(&id) else {
            return Ok(None);
        };

        post.apply(patch);
        Ok(Some(post.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memo_core::domain::{MAX_PAGE, PostAuthor};

    fn post(username: &str, tags: &[&str]) -> Post {
        Post::new(
            "Title".to_string(),
            "Body".to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
            PostAuthor {
                id: Uuid::new_v4(),
                username: username.to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_pages_are_newest_first() {
        let repo = InMemoryPostRepository::new();
        let mut ids = Vec::new();
        for _ in 0..25 {
            ids.push(repo.insert(post("alice", &[])).await.unwrap().id);
        }

        let filter = PostFilter::default();
        let first = repo.find_page(&filter, PageRequest::default()).await.unwrap();
        let last = repo
            .find_page(&filter, PageRequest::new(3).unwrap())
            .await
            .unwrap();

        assert_eq!(first.len(), 10);
        assert_eq!(first[0].id, ids[24]);
        assert_eq!(last.len(), 5);
        assert_eq!(last[4].id, ids[0]);
        assert_eq!(repo.count(&filter).await.unwrap(), 25);
    }

    #[tokio::test]
    async fn test_page_far_past_the_end_is_empty() {
        let repo = InMemoryPostRepository::new();
        repo.insert(post("alice", &[])).await.unwrap();

        let page = repo
            .find_page(&PostFilter::default(), PageRequest::new(MAX_PAGE).unwrap())
            .await
            .unwrap();

        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_filter_limits_page_and_count() {
        let repo = InMemoryPostRepository::new();
        repo.insert(post("alice", &["rust"])).await.unwrap();
        repo.insert(post("alice", &["go"])).await.unwrap();
        repo.insert(post("bob", &["rust"])).await.unwrap();

        let filter = PostFilter::new(Some("rust".to_string()), Some("alice".to_string()));
        let page = repo.find_page(&filter, PageRequest::default()).await.unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page[0].user.username, "alice");
        assert_eq!(repo.count(&filter).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_post_returns_none() {
        let repo = InMemoryPostRepository::new();
        let result = repo.update(Uuid::now_v7(), PostPatch::default()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let repo = InMemoryPostRepository::new();
        let saved = repo.insert(post("alice", &[])).await.unwrap();

        assert!(repo.delete(saved.id).await.unwrap());
        assert!(!repo.delete(saved.id).await.unwrap());
        assert!(repo.find_by_id(saved.id).await.unwrap().is_none());
    }
}
