//! Post list state for views.

use std::sync::Arc;

use folio_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};
use tokio::sync::RwLock;

use crate::client::BlogClient;
use crate::error::ClientError;

/// What a view renders: the posts, whether a call is in flight, the last error.
#[derive(Debug, Clone, Default)]
pub struct BlogState {
    pub posts: Vec<PostResponse>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Shared post list kept in step with the API.
///
/// Clones share the same state, so a view can poll [`BlogStore::snapshot`]
/// while another task drives a request.
#[derive(Clone)]
pub struct BlogStore {
    client: BlogClient,
    state: Arc<RwLock<BlogState>>,
}

impl BlogStore {
    pub fn new(client: BlogClient) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(BlogState::default())),
        }
    }

    pub async fn snapshot(&self) -> BlogState {
        self.state.read().await.clone()
    }

    /// Reload the whole list. On failure the list is emptied.
    pub async fn refresh(&self) {
        self.begin().await;
        let result = self.client.list_posts().await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(posts) => state.posts = posts,
            Err(err) => {
                state.error = Some(format!("Failed to fetch posts: {}", err));
                state.posts.clear();
            }
        }
    }

    /// Fetch one post without touching the list.
    pub async fn fetch_post(&self, id: i32) -> Result<PostResponse, ClientError> {
        self.begin().await;
        let result = self.client.get_post(id).await;
        self.finish("fetch post", &result).await;
        result
    }

    /// Create a post and put it at the top of the list.
    pub async fn create(&self, request: &CreatePostRequest) -> Result<PostResponse, ClientError> {
        self.begin().await;
        let result = self.client.create_post(request).await;
        if let Ok(post) = &result {
            self.state.write().await.posts.insert(0, post.clone());
        }
        self.finish("create post", &result).await;
        result
    }

    /// Update a post and replace it in the list.
    pub async fn update(
        &self,
        id: i32,
        request: &UpdatePostRequest,
    ) -> Result<PostResponse, ClientError> {
        self.begin().await;
        let result = self.client.update_post(id, request).await;
        if let Ok(updated) = &result {
            let mut state = self.state.write().await;
            for post in state.posts.iter_mut().filter(|p| p.id == id) {
                *post = updated.clone();
            }
        }
        self.finish("update post", &result).await;
        result
    }

    /// Delete a post and drop it from the list.
    pub async fn delete(&self, id: i32) -> Result<(), ClientError> {
        self.begin().await;
        let result = self.client.delete_post(id).await.map(|_| ());
        if result.is_ok() {
            self.state.write().await.posts.retain(|p| p.id != id);
        }
        self.finish("delete post", &result).await;
        result
    }

    async fn begin(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
    }

    async fn finish<T>(&self, action: &str, result: &Result<T, ClientError>) {
        let mut state = self.state.write().await;
        state.loading = false;
        if let Err(err) = result {
            state.error = Some(format!("Failed to {}: {}", action, err));
        }
    }
}
