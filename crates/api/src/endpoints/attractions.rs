//! Attraction endpoints: public pages and the catalog surface.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use potours_common::AppResult;
use potours_core::{
    AttractionCard, AttractionDetail, AttractionListResponse, AttractionResponse,
    CreateAttractionInput,
};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Public attraction listing in title order.
async fn list_public(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<AttractionCard>>> {
    let cards = state.attraction_service.public_list().await?;
    Ok(ApiResponse::ok(cards))
}

/// Public attraction detail with prev/next navigation.
async fn public_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<AttractionDetail>> {
    let detail = state.attraction_service.public_detail(&id).await?;
    Ok(ApiResponse::ok(detail))
}

/// Catalog listing: active and archived attractions.
async fn list_catalog(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<AttractionListResponse>> {
    let list = state.attraction_service.list().await?;
    Ok(ApiResponse::ok(list))
}

/// Fetch one attraction for the edit form.
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<AttractionResponse>> {
    let attraction = state.attraction_service.get(&id).await?;
    Ok(ApiResponse::ok(attraction))
}

/// Create a new attraction.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAttractionInput>,
) -> AppResult<ApiResponse<AttractionResponse>> {
    let attraction = state.attraction_service.create(Some(&user.id), input).await?;
    Ok(ApiResponse::ok(attraction))
}

/// Update an attraction.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CreateAttractionInput>,
) -> AppResult<ApiResponse<AttractionResponse>> {
    let attraction = state
        .attraction_service
        .update(&id, Some(&user.id), input)
        .await?;
    Ok(ApiResponse::ok(attraction))
}

/// Archive an attraction and return the refreshed listing.
async fn archive(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<AttractionListResponse>> {
    state.attraction_service.archive(&id).await?;
    let list = state.attraction_service.list().await?;
    Ok(ApiResponse::ok(list))
}

/// Restore an attraction and return the refreshed listing.
async fn restore(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<AttractionListResponse>> {
    state.attraction_service.restore(&id).await?;
    let list = state.attraction_service.list().await?;
    Ok(ApiResponse::ok(list))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_public))
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
