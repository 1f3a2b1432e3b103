//! Route table

use crate::server::handlers::{
    AppState, create_order, diagnostics, health_check, list_orders, root,
};
use axum::extract::DefaultBodyLimit;
use axum::{Router, routing::get};
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Where stored reference images are served from
#[derive(Debug, Clone)]
pub struct UploadRoute<'a> {
    /// URL prefix, e.g. `/uploads`; empty disables serving
    pub public_prefix: &'a str,
    /// Directory holding the files
    pub dir: &'a Path,
    /// Largest accepted request body
    pub max_body_bytes: usize,
}

/// Build the application router
///
/// - GET  /            - Service banner
/// - GET  /test        - Storage diagnostics
/// - GET  /health      - Liveness probe (also /healthz)
/// - GET  /orders      - Most recent orders (`?limit=N`)
/// - POST /orders      - Submit an order (multipart)
/// - GET  {prefix}/... - Stored reference images
pub fn build_router(state: AppState, uploads: UploadRoute<'_>) -> Router {
    let mut router = Router::new()
        .route("/", get(root))
        .route("/test", get(diagnostics))
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/orders", get(list_orders).post(create_order));

    if !uploads.public_prefix.is_empty() {
        router = router.nest_service(uploads.public_prefix, ServeDir::new(uploads.dir));
    }

    router.with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(DefaultBodyLimit::max(uploads.max_body_bytes)),
    )
}
