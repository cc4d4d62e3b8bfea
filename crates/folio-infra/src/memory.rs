//! In-memory post repository - used when no database is configured and in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use folio_core::domain::{NewPost, Post, PostChanges, PostId};
use folio_core::error::RepoError;
use folio_core::ports::{BaseRepository, PostRepository};

#[derive(Default)]
struct Store {
    posts: BTreeMap<PostId, Post>,
    last_id: PostId,
}

/// In-memory post store behind an async RwLock.
///
/// Ids are handed out sequentially and never reused, even after deletes.
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.get(&id).cloned())
    }

    async fn delete(&self, id: PostId) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store.posts.values().cloned().collect();
        posts.sort_by(|a, b| {
            b.publish_date
                .cmp(&a.publish_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(posts)
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| RepoError::Query("post id sequence exhausted".to_string()))?;

        let now = Utc::now();
        let post = Post {
            id,
            title: new_post.title,
            content: new_post.content,
            publish_date: new_post.publish_date.unwrap_or(now),
            created_at: now,
            updated_at: now,
        };

        store.last_id = id;
        store.posts.insert(id, post.clone());
        tracing::debug!(post_id = id, "Inserted post (in-memory)");

        Ok(post)
    }

    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let post = store.posts.get_mut(&id).ok_or(RepoError::NotFound)?;

        post.apply(changes, Utc::now());
        tracing::debug!(post_id = id, "Updated post (in-memory)");

        Ok(post.clone())
    }
}
