//! Post resource handlers.
//!
//! Each handler validates its input, calls the repository and wraps the
//! outcome in the standard envelope. Failures flow out as `AppError`.

use actix_web::{HttpResponse, web};
use serde_json::Value;

use folio_core::domain::{Post, PostId};
use folio_shared::ApiResponse;
use folio_shared::dto::PostResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::validation::{new_post, parse_post_id, post_changes};

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        publish_date: post.publish_date,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn post_not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    tracing::debug!(count = posts.len(), "Listed posts");

    let data: Vec<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(data)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path)?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(post_not_found)?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post))))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let input = new_post(body.into_inner())?;

    let post = state.posts.create(input).await?;
    tracing::info!(post_id = post.id, "Post created");

    Ok(HttpResponse::Created().json(ApiResponse::ok(to_response(post))))
}

/// PUT /api/posts/{id}
///
/// The id is checked before the body, so a bad id is reported even when the
/// payload is unreadable too.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: Result<web::Json<Value>, actix_web::Error>,
) -> actix_web::Result<HttpResponse> {
    let id = parse_post_id(&path)?;
    let body = body?;

    Ok(update_existing(&state, id, body.into_inner()).await?)
}

/// The existence check and the write are separate calls. A delete landing in
/// between surfaces as the repository's own `NotFound`.
async fn update_existing(state: &AppState, id: PostId, body: Value) -> AppResult<HttpResponse> {
    let changes = post_changes(body)?;
    if changes.is_empty() {
        tracing::debug!(post_id = id, "Update carries no fields, touching updatedAt only");
    }

    if state.posts.find_by_id(id).await?.is_none() {
        tracing::debug!(post_id = id, "Update of missing post");
        return Err(post_not_found());
    }

    let post = state.posts.update(id, changes).await?;
    tracing::info!(post_id = post.id, "Post updated");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post))))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path)?;

    if state.posts.find_by_id(id).await?.is_none() {
        tracing::debug!(post_id = id, "Delete of missing post");
        return Err(post_not_found());
    }

    state.posts.delete(id).await?;
    tracing::info!(post_id = id, "Post deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::message("Post deleted successfully")))
}
