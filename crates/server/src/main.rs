//! Potours server entry point.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{Router, middleware};
use potours_api::{middleware::AppState, router as api_router};
use potours_common::{Config, LocalStorage};
use potours_core::{
    AttractionService, BlogService, GroupTourService, IncludeService, JourneyService,
    TourDayService, TourDetailService,
};
use potours_db::repositories::{
    AttractionRepository, BlogPostRepository, GroupTourMediaRepository, GroupTourRepository,
    IncludeRepository, TourDayRepository, UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "potours=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting potours server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = potours_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    potours_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let attraction_repo = AttractionRepository::new(Arc::clone(&db));
    let include_repo = IncludeRepository::new(Arc::clone(&db));
    let tour_day_repo = TourDayRepository::new(Arc::clone(&db));
    let group_tour_repo = GroupTourRepository::new(Arc::clone(&db));
    let media_repo = GroupTourMediaRepository::new(Arc::clone(&db));
    let blog_repo = BlogPostRepository::new(Arc::clone(&db));

    // Media storage backend; files are served by an external collaborator
    // under the configured URL prefix
    let media_url = if config.media.url.ends_with('/') {
        config.media.url.clone()
    } else {
        format!("{}/", config.media.url)
    };
    let storage = Arc::new(LocalStorage::new(
        PathBuf::from(&config.media.root),
        media_url.trim_end_matches('/').to_string(),
    ));

    // Initialize services
    let attraction_service = AttractionService::new(attraction_repo.clone(), media_url.clone());
    let include_service = IncludeService::new(include_repo);
    let tour_day_service = TourDayService::new(tour_day_repo.clone());
    let group_tour_service = GroupTourService::new(
        group_tour_repo.clone(),
        media_repo.clone(),
        storage,
        media_url.clone(),
    );
    let tour_detail_service = TourDetailService::new(
        group_tour_repo,
        tour_day_repo,
        media_repo,
        media_url.clone(),
    );
    let blog_service = BlogService::new(blog_repo, user_repo.clone());
    let journey_service = JourneyService::new(attraction_repo, media_url);

    // Create app state
    let state = AppState {
        attraction_service,
        include_service,
        tour_day_service,
        group_tour_service,
        tour_detail_service,
        blog_service,
        journey_service,
        user_repo,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            potours_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
