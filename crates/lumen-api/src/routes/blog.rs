//! Blog endpoints.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use lumen_content::{CategoryInfo, DEFAULT_RELATED_LIMIT, Post, PostMeta};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::ApiState;

/// Query for `GET /api/blog`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Exact category to filter by. Empty means no filter.
    pub category: Option<String>,
}

/// Query for `GET /api/blog/{slug}/related`.
#[derive(Debug, Default, Deserialize)]
pub struct RelatedParams {
    /// Maximum number of posts to return.
    pub limit: Option<usize>,
}

/// A list of posts.
#[derive(Debug, Serialize)]
pub struct PostsResponse {
    /// Post metadata, in ranking or date order.
    pub posts: Vec<PostMeta>,
}

/// Category counts.
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    /// Non-empty categories, by name.
    pub categories: Vec<CategoryInfo>,
}

/// One post.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    /// Metadata and body.
    pub post: Post,
}

/// `GET /api/blog`
pub async fn list(
    State(state): State<ApiState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<PostsResponse>> {
    let Query(params) = params.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let posts = match params.category.as_deref().filter(|c| !c.is_empty()) {
        Some(category) => state.posts.list_by_category(category).await?,
        None => state.posts.list_all().await?,
    };
    Ok(Json(PostsResponse { posts }))
}

/// `GET /api/blog/categories`
pub async fn categories(State(state): State<ApiState>) -> ApiResult<Json<CategoriesResponse>> {
    let categories = state.posts.list_categories().await?;
    Ok(Json(CategoriesResponse { categories }))
}

/// `GET /api/blog/{slug}`
pub async fn show(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<PostResponse>> {
    let post = state
        .posts
        .get_one(&slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;
    Ok(Json(PostResponse { post }))
}

/// `GET /api/blog/{slug}/related`
pub async fn related(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
    params: Result<Query<RelatedParams>, QueryRejection>,
) -> ApiResult<Json<PostsResponse>> {
    let Query(params) = params.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let limit = params.limit.unwrap_or(DEFAULT_RELATED_LIMIT);

    let posts = state
        .posts
        .related(&slug, limit)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;
    Ok(Json(PostsResponse { posts }))
}
