//! Blog endpoints: the public blog and the catalog surface.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use potours_common::AppResult;
use potours_core::{
    BlogCatalogResponse, BlogListParams, BlogPageResponse, BlogPostResponse, CreateBlogPostInput,
};
use serde::Deserialize;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Raw page parameter of the public blog.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<String>,
}

/// Public blog page, nine posts per page. Bad page numbers serve page 1.
async fn public_page(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<ApiResponse<BlogPageResponse>> {
    let page = state.blog_service.public_page(params.page.as_deref()).await?;
    Ok(ApiResponse::ok(page))
}

/// Public blog post detail.
async fn public_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<BlogPostResponse>> {
    let post = state.blog_service.public_detail(&id).await?;
    Ok(ApiResponse::ok(post))
}

/// Catalog listing with date-range/text filters and sort toggles.
async fn list_catalog(
    State(state): State<AppState>,
    Query(params): Query<BlogListParams>,
) -> AppResult<ApiResponse<BlogCatalogResponse>> {
    let list = state.blog_service.catalog_list(&params).await?;
    Ok(ApiResponse::ok(list))
}

/// Fetch one post for the edit form.
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<BlogPostResponse>> {
    let post = state.blog_service.get(&id).await?;
    Ok(ApiResponse::ok(post))
}

/// Create a new blog post.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateBlogPostInput>,
) -> AppResult<ApiResponse<BlogPostResponse>> {
    let post = state.blog_service.create(Some(&user.id), input).await?;
    Ok(ApiResponse::ok(post))
}

/// Update a blog post.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CreateBlogPostInput>,
) -> AppResult<ApiResponse<BlogPostResponse>> {
    let post = state.blog_service.update(&id, Some(&user.id), input).await?;
    Ok(ApiResponse::ok(post))
}

/// Archive a post and return the refreshed (unfiltered) listing.
async fn archive(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<BlogCatalogResponse>> {
    state.blog_service.archive(&id).await?;
    let list = state.blog_service.catalog_list(&BlogListParams::default()).await?;
    Ok(ApiResponse::ok(list))
}

/// Restore a post and return the refreshed (unfiltered) listing.
async fn restore(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<BlogCatalogResponse>> {
    state.blog_service.restore(&id).await?;
    let list = state.blog_service.catalog_list(&BlogListParams::default()).await?;
    Ok(ApiResponse::ok(list))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(public_page))
        .route("/{id}", get(public_detail))
}

pub fn catalog_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_catalog))
        .route("/create", post(create))
        .route("/{id}", get(get_one))
        .route("/{id}/update", post(update))
        .route("/{id}/archive", post(archive))
        .route("/{id}/restore", post(restore))
}
