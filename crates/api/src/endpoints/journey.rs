//! Journey builder wizard endpoints.

use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use potours_common::AppResult;
use potours_core::{
    JourneyStep2Response, JourneyStep3Response, JourneyStep4Response, JourneyStep5Response,
};
use serde::Deserialize;

use crate::{middleware::AppState, response::ApiResponse};

/// Raw stage parameter of step two.
#[derive(Debug, Deserialize)]
pub struct StageParams {
    #[serde(default)]
    pub stage: Option<String>,
}

/// Step two: the preference slider, keyed by stage.
async fn step2(
    State(state): State<AppState>,
    Query(params): Query<StageParams>,
) -> AppResult<ApiResponse<JourneyStep2Response>> {
    let payload = state.journey_service.step2(params.stage.as_deref()).await?;
    Ok(ApiResponse::ok(payload))
}

/// Step three: categorized attractions for the map view.
async fn step3(State(state): State<AppState>) -> AppResult<ApiResponse<JourneyStep3Response>> {
    let payload = state.journey_service.step3().await?;
    Ok(ApiResponse::ok(payload))
}

/// Step four: cover and city choices.
async fn step4(State(state): State<AppState>) -> AppResult<ApiResponse<JourneyStep4Response>> {
    let payload = state.journey_service.step4().await?;
    Ok(ApiResponse::ok(payload))
}

/// Step five: the summary cover.
async fn step5(State(state): State<AppState>) -> AppResult<ApiResponse<JourneyStep5Response>> {
    let payload = state.journey_service.step5().await?;
    Ok(ApiResponse::ok(payload))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/step2", get(step2))
        .route("/step3", get(step3))
        .route("/step4", get(step4))
        .route("/step5", get(step5))
}
