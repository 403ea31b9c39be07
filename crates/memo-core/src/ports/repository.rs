use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{PageRequest, Post, PostFilter, PostPatch};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity and return the stored state.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Returns whether anything was removed.
    async fn delete(&self, id: ID) -> Result<bool, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// One page of posts matching `filter`, newest first.
    async fn find_page(&self, filter: &PostFilter, page: PageRequest)
    -> Result<Vec<Post>, RepoError>;

    /// Number of posts matching `filter`, ignoring pagination.
    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError>;

    /// Merge `patch` into the stored post. `None` if no post has this id.
    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, RepoError>;
}
