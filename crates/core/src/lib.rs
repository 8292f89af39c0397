//! Core business logic for potours.

pub mod services;

pub use services::*;
