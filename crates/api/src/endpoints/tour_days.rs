//! Tour day catalog endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use potours_common::AppResult;
use potours_core::{CreateTourDayInput, TourDayListResponse, TourDayResponse};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Catalog listing: active and archived tour days.
async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<TourDayListResponse>> {
    let list = state.tour_day_service.list().await?;
    Ok(ApiResponse::ok(list))
}

/// Fetch one tour day, links included, for the edit form.
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<TourDayResponse>> {
    let day = state.tour_day_service.get(&id).await?;
    Ok(ApiResponse::ok(day))
}

/// Create a tour day with its ordered attraction and include links.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTourDayInput>,
) -> AppResult<ApiResponse<TourDayResponse>> {
    let day = state.tour_day_service.create(Some(&user.id), input).await?;
    Ok(ApiResponse::ok(day))
}

/// Update a tour day; the submitted link sequences replace the stored ones.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CreateTourDayInput>,
) -> AppResult<ApiResponse<TourDayResponse>> {
    let day = state
        .tour_day_service
        .update(&id, Some(&user.id), input)
        .await?;
    Ok(ApiResponse::ok(day))
}

/// Archive a tour day and return the refreshed listing.
async fn archive(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<TourDayListResponse>> {
    state.tour_day_service.archive(&id).await?;
    let list = state.tour_day_service.list().await?;
    Ok(ApiResponse::ok(list))
}

/// Restore a tour day and return the refreshed listing.
async fn restore(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<TourDayListResponse>> {
    state.tour_day_service.restore(&id).await?;
    let list = state.tour_day_service.list().await?;
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
