//! Include catalog endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use potours_common::AppResult;
use potours_core::{CreateIncludeInput, IncludeListResponse, IncludeResponse};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Catalog listing: active and archived includes.
async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<IncludeListResponse>> {
    let list = state.include_service.list().await?;
    Ok(ApiResponse::ok(list))
}

/// Fetch one include for the edit form.
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<IncludeResponse>> {
    let include = state.include_service.get(&id).await?;
    Ok(ApiResponse::ok(include))
}

/// Create a new include.
async fn create(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateIncludeInput>,
) -> AppResult<ApiResponse<IncludeResponse>> {
    let include = state.include_service.create(input).await?;
    Ok(ApiResponse::ok(include))
}

/// Update an include.
async fn update(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CreateIncludeInput>,
) -> AppResult<ApiResponse<IncludeResponse>> {
    let include = state.include_service.update(&id, input).await?;
    Ok(ApiResponse::ok(include))
}

/// Archive an include and return the refreshed listing.
async fn archive(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<IncludeListResponse>> {
    state.include_service.archive(&id).await?;
    let list = state.include_service.list().await?;
    Ok(ApiResponse::ok(list))
}

/// Restore an include and return the refreshed listing.
async fn restore(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<IncludeListResponse>> {
    state.include_service.restore(&id).await?;
    let list = state.include_service.list().await?;
    Ok(ApiResponse::ok(list))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/create", post(create))
        .route("/{id}", get(get_one))
        .route("/{id}/update", post(update))
        .route("/{id}/archive", post(archive))
        .route("/{id}/restore", post(restore))
}
