/**
 * Post Handlers
 *
 * # Routes (all protected)
 *
 * - `POST /api/posts` - create a post
 * - `GET /api/posts` - all posts, newest first
 * - `GET /api/posts/{id}` - one post
 * - `DELETE /api/posts/{id}` - delete own post
 * - `PUT /api/posts/like/{id}` - like a post once
 * - `PUT /api/posts/unlike/{id}` - remove own like
 * - `POST /api/posts/comment/{id}` - comment on a post
 * - `DELETE /api/posts/comment/{id}/{comment_id}` - delete own comment
 *
 * Likes and comments are newest first. Like, unlike and comment endpoints
 * return the updated list rather than the whole post.
 */
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::backend::auth::ownership::ensure_owner;
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::store::Store;
use crate::shared::identity::Identity;
use crate::shared::post::{Comment, Like, Post, TextRequest};
use crate::shared::user::User;

const POST_NOT_FOUND_MSG: &str = "Post not found";

async fn load_post(store: &dyn Store, id: &str) -> Result<Post, ApiError> {
    store
        .find_post(id)
        .await?
        .ok_or_else(|| ApiError::not_found(POST_NOT_FOUND_MSG))
}

/// The caller's account, needed to copy name and avatar onto new content
async fn load_author(store: &dyn Store, caller: &Identity) -> Result<User, ApiError> {
    store
        .find_user_by_id(caller)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))
}

pub async fn create_post(
    user: AuthUser,
    State(store): State<Arc<dyn Store>>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<Post>, ApiError> {
    let Json(request) = payload?;
    let text = request.into_text()?;

    let author = load_author(store.as_ref(), user.identity()).await?;
    let post = store.save_post(Post::new(&author, text)).await?;

    tracing::info!("Post {} created by {}", post.id, post.user);
    Ok(Json(post))
}

pub async fn list_posts(
    _user: AuthUser,
    State(store): State<Arc<dyn Store>>,
) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(store.list_posts().await?))
}

pub async fn get_post(
    _user: AuthUser,
    Path(id): Path<String>,
    State(store): State<Arc<dyn Store>>,
) -> Result<Json<Post>, ApiError> {
    Ok(Json(load_post(store.as_ref(), &id).await?))
}

pub async fn delete_post(
    user: AuthUser,
    Path(id): Path<String>,
    State(store): State<Arc<dyn Store>>,
) -> Result<Json<Value>, ApiError> {
    let post = load_post(store.as_ref(), &id).await?;
    ensure_owner(user.identity(), &post)?;

    store.delete_post(&post.id).await?;

    tracing::info!("Post {} removed by {}", post.id, user.identity());
    Ok(Json(json!({ "msg": "Post removed" })))
}

pub async fn like_post(
    user: AuthUser,
    Path(id): Path<String>,
    State(store): State<Arc<dyn Store>>,
) -> Result<Json<Vec<Like>>, ApiError> {
    let mut post = load_post(store.as_ref(), &id).await?;
    if post.is_liked_by(user.identity()) {
        return Err(ApiError::bad_request("Post already liked"));
    }

    post.likes.insert(
        0,
        Like {
            user: user.identity().clone(),
        },
    );

    let post = store.save_post(post).await?;
    Ok(Json(post.likes))
}

pub async fn unlike_post(
    user: AuthUser,
    Path(id): Path<String>,
    State(store): State<Arc<dyn Store>>,
) -> Result<Json<Vec<Like>>, ApiError> {
    let mut post = load_post(store.as_ref(), &id).await?;
    if !post.is_liked_by(user.identity()) {
        return Err(ApiError::bad_request("Post has not yet been liked"));
    }

    post.likes.retain(|like| &like.user != user.identity());

    let post = store.save_post(post).await?;
    Ok(Json(post.likes))
}

pub async fn add_comment(
    user: AuthUser,
    Path(id): Path<String>,
    State(store): State<Arc<dyn Store>>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let Json(request) = payload?;
    let text = request.into_text()?;

    let author = load_author(store.as_ref(), user.identity()).await?;
    let mut post = load_post(store.as_ref(), &id).await?;
    post.comments.insert(0, Comment::new(&author, text));

    let post = store.save_post(post).await?;
    Ok(Json(post.comments))
}

pub async fn delete_comment(
    user: AuthUser,
    Path((id, comment_id)): Path<(String, String)>,
    State(store): State<Arc<dyn Store>>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let mut post = load_post(store.as_ref(), &id).await?;

    let comment = post
        .comment(&comment_id)
        .ok_or_else(|| ApiError::not_found("Comment does not exist"))?;
    ensure_owner(user.identity(), comment)?;

    post.comments.retain(|c| c.id != comment_id);

    let post = store.save_post(post).await?;
    Ok(Json(post.comments))
}
