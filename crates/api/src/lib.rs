//! HTTP API layer for potours.
//!
//! This crate provides the public read API and the authenticated catalog
//! surface:
//!
//! - **Endpoints**: public pages (home, tours, attractions, blog, journey
//!   wizard) and per-entity catalog routes
//! - **Extractors**: authentication
//! - **Middleware**: bearer-token actor resolution
//!
//! Built on Axum with a Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
