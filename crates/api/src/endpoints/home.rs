//! Home page endpoint.

use axum::{Router, extract::State, routing::get};
use potours_common::AppResult;
use potours_core::{AttractionCard, GroupTourCard};
use serde::Serialize;

use crate::{middleware::AppState, response::ApiResponse};

/// Number of featured tours on the home page.
const FEATURED_TOURS: u64 = 4;

/// Home page payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    pub featured_group_tours: Vec<GroupTourCard>,
    pub featured_attractions: Vec<AttractionCard>,
}

/// Home page: random featured tours plus the attraction strip.
async fn home(State(state): State<AppState>) -> AppResult<ApiResponse<HomeResponse>> {
    let featured_group_tours = state
        .group_tour_service
        .featured_cards(FEATURED_TOURS)
        .await?;
    let featured_attractions = state.attraction_service.public_list().await?;

    Ok(ApiResponse::ok(HomeResponse {
        featured_group_tours,
        featured_attractions,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/home", get(home))
}
