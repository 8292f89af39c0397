//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use potours_core::{
    AttractionService, BlogService, GroupTourService, IncludeService, JourneyService,
    TourDayService, TourDetailService,
};
use potours_db::repositories::UserRepository;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub attraction_service: AttractionService,
    pub include_service: IncludeService,
    pub tour_day_service: TourDayService,
    pub group_tour_service: GroupTourService,
    pub tour_detail_service: TourDetailService,
    pub blog_service: BlogService,
    pub journey_service: JourneyService,
    pub user_repo: UserRepository,
}

/// Authentication middleware.
///
/// Authentication itself lives with an external collaborator; this only
/// resolves a bearer token to an editor so writes can be attributed.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(Some(user)) = state.user_repo.find_by_token(token).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
