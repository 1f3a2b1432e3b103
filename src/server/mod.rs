//! HTTP surface of the order backend
//!
//! `ServerBuilder` wires the order service into an axum router with:
//! - the order routes (`GET`/`POST /orders`)
//! - banner, health and storage diagnostic routes
//! - static serving of stored reference images

pub mod builder;
pub mod extractors;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
