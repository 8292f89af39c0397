//! Catalog dashboard endpoint.

use axum::{Router, extract::State, routing::get};
use potours_common::AppResult;
use potours_core::EntityCounts;
use serde::Serialize;

use crate::{middleware::AppState, response::ApiResponse};

/// Active/archived record counts per entity kind.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub attractions: EntityCounts,
    pub tour_days: EntityCounts,
    pub includes: EntityCounts,
    pub group_tours: EntityCounts,
    pub blog_posts: EntityCounts,
}

/// Record counts shown on the catalog dashboard.
async fn dashboard(State(state): State<AppState>) -> AppResult<ApiResponse<DashboardResponse>> {
    Ok(ApiResponse::ok(DashboardResponse {
        attractions: state.attraction_service.counts().await?,
        tour_days: state.tour_day_service.counts().await?,
        includes: state.include_service.counts().await?,
        group_tours: state.group_tour_service.counts().await?,
        blog_posts: state.blog_service.counts().await?,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}
