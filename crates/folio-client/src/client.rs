//! HTTP client for the posts API.

use std::time::Duration;

use folio_shared::dto::{CreatePostRequest, HealthResponse, PostResponse, UpdatePostRequest};
use folio_shared::{ApiResponse, ErrorResponse};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, including the `/api` prefix.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001/api".to_string(),
            timeout: Duration::from_millis(10_000),
        }
    }
}

impl ClientConfig {
    /// Load configuration from `FOLIO_API_BASE_URL` and `FOLIO_API_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("FOLIO_API_BASE_URL").unwrap_or(defaults.base_url),
            timeout: std::env::var("FOLIO_API_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.timeout),
        }
    }
}

/// Typed wrapper over the posts API.
#[derive(Debug, Clone)]
pub struct BlogClient {
    http: reqwest::Client,
    base_url: String,
}

impl BlogClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET /posts - newest publish date first.
    pub async fn list_posts(&self) -> Result<Vec<PostResponse>, ClientError> {
        let response = self.send(self.request(Method::GET, "/posts")).await?;
        into_data(response)
    }

    /// GET /posts/{id}
    pub async fn get_post(&self, id: i32) -> Result<PostResponse, ClientError> {
        let path = format!("/posts/{}", id);
        let response = self.send(self.request(Method::GET, &path)).await?;
        into_data(response)
    }

    /// POST /posts
    pub async fn create_post(
        &self,
        request: &CreatePostRequest,
    ) -> Result<PostResponse, ClientError> {
        let response = self
            .send(self.request(Method::POST, "/posts").json(request))
            .await?;
        into_data(response)
    }

    /// PUT /posts/{id}
    pub async fn update_post(
        &self,
        id: i32,
        request: &UpdatePostRequest,
    ) -> Result<PostResponse, ClientError> {
        let path = format!("/posts/{}", id);
        let response = self
            .send(self.request(Method::PUT, &path).json(request))
            .await?;
        into_data(response)
    }

    /// DELETE /posts/{id} - returns the server's confirmation message.
    pub async fn delete_post(&self, id: i32) -> Result<String, ClientError> {
        let path = format!("/posts/{}", id);
        let response: ApiResponse<serde::de::IgnoredAny> =
            self.send(self.request(Method::DELETE, &path)).await?;
        Ok(response.message.unwrap_or_default())
    }

    /// GET /health, served next to (not under) the API root.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let root = self
            .base_url
            .strip_suffix("/api")
            .unwrap_or(&self.base_url);
        self.send(self.http.get(format!("{}/health", root))).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await.map_err(|err| {
            tracing::warn!(error = %err, "API request failed before a response");
            ClientError::from_transport(err)
        })?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), url = %response.url(), "API response");

        if status.is_success() {
            return response.json::<T>().await.map_err(ClientError::from_transport);
        }

        let body = response.json::<ErrorResponse>().await.ok();
        Err(ClientError::from_status(status.as_u16(), body))
    }
}

fn into_data<T>(response: ApiResponse<T>) -> Result<T, ClientError> {
    response
        .data
        .ok_or_else(|| ClientError::Decode("response carried no data".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::{CannedResponse, serve};

    fn client_for(base_url: String, timeout: Duration) -> BlogClient {
        BlogClient::new(ClientConfig { base_url, timeout }).unwrap()
    }

    fn post_json(id: i32, title: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": title,
            "content": "Body",
            "publishDate": "2024-01-25T09:45:00Z",
            "createdAt": "2024-01-25T09:45:00Z",
            "updatedAt": "2024-01-25T09:45:00Z"
        })
    }

    #[tokio::test]
    async fn test_list_posts_decodes_envelope() {
        let base_url = serve(vec![CannedResponse::json(
            200,
            serde_json::json!({ "success": true, "data": [post_json(3, "Deployment")] }),
        )])
        .await;
        let client = client_for(base_url, Duration::from_secs(5));

        let posts = client.list_posts().await.unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, 3);
        assert_eq!(posts[0].title, "Deployment");
    }

    #[tokio::test]
    async fn test_delete_returns_message() {
        let base_url = serve(vec![CannedResponse::json(
            200,
            serde_json::json!({ "success": true, "message": "Post deleted successfully" }),
        )])
        .await;
        let client = client_for(base_url, Duration::from_secs(5));

        let message = client.delete_post(3).await.unwrap();
        assert_eq!(message, "Post deleted successfully");
    }

    #[tokio::test]
    async fn test_not_found_status() {
        let base_url = serve(vec![CannedResponse::json(
            404,
            serde_json::json!({
                "success": false,
                "error": { "message": "Post not found", "code": "NOT_FOUND" }
            }),
        )])
        .await;
        let client = client_for(base_url, Duration::from_secs(5));

        let err = client.get_post(999_999).await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound));
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let base_url = serve(vec![CannedResponse::json(
            500,
            serde_json::json!({
                "success": false,
                "error": { "message": "Internal server error", "code": "INTERNAL_ERROR" }
            }),
        )])
        .await;
        let client = client_for(base_url, Duration::from_secs(5));

        let err = client.list_posts().await.unwrap_err();
        assert!(matches!(err, ClientError::Server));
        assert_eq!(err.to_string(), "Server error. Please try again later.");
    }

    #[tokio::test]
    async fn test_validation_failure_keeps_details() {
        let base_url = serve(vec![CannedResponse::json(
            400,
            serde_json::json!({
                "success": false,
                "error": {
                    "message": "Validation failed",
                    "code": "VALIDATION_ERROR",
                    "details": [{ "field": "title", "code": "length", "message": "Title must be between 1 and 255 characters" }]
                }
            }),
        )])
        .await;
        let client = client_for(base_url, Duration::from_secs(5));

        let err = client
            .create_post(&CreatePostRequest::new("", "hello"))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = client_for(format!("http://127.0.0.1:{port}/api"), Duration::from_secs(5));

        let err = client.list_posts().await.unwrap_err();
        assert!(matches!(err, ClientError::Network));
        assert_eq!(err.to_string(), "Network error. Please check your connection.");
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        // Accepts connections (via the backlog) but never answers.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let client = client_for(
            format!("http://127.0.0.1:{port}/api"),
            Duration::from_millis(200),
        );

        let err = client.list_posts().await.unwrap_err();
        assert!(matches!(err, ClientError::Timeout));
        drop(listener);
    }

    #[tokio::test]
    async fn test_health_is_served_from_root() {
        let base_url = serve(vec![CannedResponse::json(
            200,
            serde_json::json!({ "status": "ok", "version": "0.1.0", "timestamp": "2024-01-25T09:45:00Z" }),
        )])
        .await;
        let client = client_for(base_url, Duration::from_secs(5));

        let health = client.health().await.unwrap();
        assert_eq!(health.status, "ok");
    }
}
