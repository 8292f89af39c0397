//! Public group tour endpoints.

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use potours_common::AppResult;
use potours_core::{GroupTourCard, GroupTourCardRow, TourDetail};

use crate::{middleware::AppState, response::ApiResponse};

/// Public tours listing, newest first.
async fn list_tours(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<GroupTourCard>>> {
    let cards = state.group_tour_service.public_cards().await?;
    Ok(ApiResponse::ok(cards))
}

/// All-records group tours page, cards grouped into display rows.
async fn all_tours(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<GroupTourCardRow>>> {
    let rows = state.group_tour_service.all_card_rows().await?;
    Ok(ApiResponse::ok(rows))
}

/// Tour detail page: gallery, itinerary, highlights, includes.
async fn tour_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<TourDetail>> {
    let detail = state.tour_detail_service.get(&id).await?;
    Ok(ApiResponse::ok(detail))
}

/// Inspiration detail page, same payload as the tour detail.
async fn inspiration_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<TourDetail>> {
    let detail = state.tour_detail_service.get(&id).await?;
    Ok(ApiResponse::ok(detail))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tours))
        .route("/all", get(all_tours))
        .route("/{id}", get(tour_detail))
        .route("/{id}/inspiration", get(inspiration_detail))
}
