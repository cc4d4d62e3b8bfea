use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges, PostId};
use crate::error::RepoError;

/// Generic repository trait shared by every entity gateway.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Hard-delete an entity by its ID.
    ///
    /// Returns `RepoError::NotFound` when no row matched.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository - the persistence gateway for blog posts.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// All posts, most recent `publish_date` first. Ties fall back to the
    /// higher id first.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Insert a post. The store assigns the id and both timestamps.
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError>;

    /// Apply a partial update and refresh `updated_at`.
    ///
    /// Returns `RepoError::NotFound` when the row does not exist at write time.
    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Post, RepoError>;
}
