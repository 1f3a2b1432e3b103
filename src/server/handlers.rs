//! HTTP handlers

use crate::core::error::{BakeryError, ValidationError};
use crate::core::order::CakeOrder;
use crate::core::service::OrderService;
use crate::server::extractors::OrderForm;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: OrderService,
    /// Whether a database connection string was configured
    pub database_url_configured: bool,
}

/// Response to a successful order submission
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub id: String,
    pub message: String,
    pub price_omr: f64,
}

/// Response to `GET /orders`
#[derive(Debug, Serialize, Deserialize)]
pub struct ListOrdersResponse {
    pub orders: Vec<CakeOrder>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

/// POST /orders
pub async fn create_order(
    State(state): State<AppState>,
    OrderForm(submission): OrderForm,
) -> Result<Json<CreateOrderResponse>, BakeryError> {
    let receipt = state.service.submit(submission).await?;

    Ok(Json(CreateOrderResponse {
        id: receipt.id,
        message: "Order created".to_string(),
        price_omr: receipt.price_omr,
    }))
}

/// GET /orders?limit=N
pub async fn list_orders(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ListOrdersResponse>, BakeryError> {
    let Query(query) = query.map_err(|e| ValidationError::MalformedQuery {
        message: e.body_text(),
    })?;

    let orders = state.service.list(query.limit).await?;
    Ok(Json(ListOrdersResponse { orders }))
}

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Divine Flavours backend is running"
    }))
}

/// GET /health and /healthz
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME")
    }))
}

/// GET /test
///
/// Always answers 200; a storage failure is described in the body.
pub async fn diagnostics(State(state): State<AppState>) -> Json<Value> {
    let database_url = if state.database_url_configured {
        "Set"
    } else {
        "Not Set"
    };

    let body = match state.service.diagnostics().await {
        Ok(report) => json!({
            "backend": "Running",
            "storage": report.backend,
            "database": "Connected & Working",
            "database_url": database_url,
            "database_name": report.database_name,
            "connection_status": "Connected",
            "collections": report.collections,
        }),
        Err(e) => {
            tracing::warn!(error = %e, "storage diagnostics failed");
            json!({
                "backend": "Running",
                "database": format!("Error: {}", e),
                "database_url": database_url,
                "database_name": Value::Null,
                "connection_status": "Not Connected",
                "collections": [],
            })
        }
    };

    Json(body)
}
