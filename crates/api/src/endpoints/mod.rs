//! API endpoints.

mod attractions;
mod blog;
mod dashboard;
mod group_tours;
mod home;
mod includes;
mod journey;
mod tour_days;
mod tours;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(home::router())
        .nest("/tours", tours::router())
        .nest("/attractions", attractions::router())
        .nest("/blog", blog::router())
        .nest("/journey", journey::router())
        .nest("/catalog", catalog_router())
}

/// Catalog surface: per-entity list / create / edit / archive / restore.
fn catalog_router() -> Router<AppState> {
    Router::new()
        .merge(dashboard::router())
        .nest("/attractions", attractions::catalog_router())
        .nest("/includes", includes::router())
        .nest("/tour-days", tour_days::router())
        .nest("/group-tours", group_tours::router())
        .nest("/blog", blog::catalog_router())
}
