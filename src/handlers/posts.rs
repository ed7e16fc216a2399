// src/handlers/posts.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    fetcher::PostSource,
    listing::{derive, distinct_values},
    models::post::{PostListParams, PostPreview},
    utils::extract::{ValidatedPath, ValidatedQuery},
};

/// Lists blog posts from the remote API: search, author filter, sort, paginate.
/// Items are previews carrying an excerpt instead of the full body.
pub async fn list_posts(
    State(posts): State<Arc<dyn PostSource>>,
    ValidatedQuery(params): ValidatedQuery<PostListParams>,
) -> Result<impl IntoResponse, AppError> {
    let all = posts.fetch_posts().await?;
    let page = derive(&all, &params.query(), &params.pagination()).map(PostPreview::from);

    Ok(Json(page))
}

/// Author ids present in the collection, ascending.
pub async fn list_authors(
    State(posts): State<Arc<dyn PostSource>>,
) -> Result<impl IntoResponse, AppError> {
    let all = posts.fetch_posts().await?;
    Ok(Json(distinct_values(&all, |post| post.user_id)))
}

/// Retrieves a single post with its full body.
pub async fn get_post(
    State(posts): State<Arc<dyn PostSource>>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(posts.fetch_post(id).await?))
}
