//! HTTP surface of the order service
//!
//! Routes and stub handlers wiring the telemetry subsystem into the request
//! pipeline. Business-rule validation, persistence, and token issuance are
//! external collaborators; the handlers here carry just enough behavior to
//! drive the session, authentication, order, and revenue counters.

use crate::constants::endpoint;
use crate::metrics::{interceptor, Telemetry};
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub telemetry: Telemetry,
    menu: Arc<Vec<MenuItem>>,
}

impl AppState {
    #[must_use]
    pub fn new(telemetry: Telemetry) -> Self {
        Self {
            telemetry,
            menu: Arc::new(default_menu()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: u64,
    pub title: String,
    pub image: String,
    pub price: f64,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub menu_id: u64,
    pub description: String,
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub franchise_id: u64,
    pub store_id: u64,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

fn default_menu() -> Vec<MenuItem> {
    vec![MenuItem {
        id: 1,
        title: "Veggie".to_string(),
        image: "pizza1.png".to_string(),
        price: 0.0038,
        description: "A garden of delight".to_string(),
    }]
}

/// Build the service router with the instrumentation middleware applied
pub fn build_router(state: AppState) -> Router {
    let telemetry = state.telemetry.clone();

    Router::new()
        .route("/", get(welcome))
        .route("/api/order/menu", get(get_menu))
        .route(endpoint::ORDER_PATH, post(create_order))
        .route("/api/auth", put(login).delete(logout))
        .fallback(unknown_endpoint)
        .layer(middleware::from_fn_with_state(
            telemetry,
            interceptor::track_requests,
        ))
        .with_state(state)
}

async fn welcome() -> Json<serde_json::Value> {
    Json(json!({
        "message": "welcome to the pizza service",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn get_menu(State(state): State<AppState>) -> Json<Vec<MenuItem>> {
    Json(state.menu.as_ref().clone())
}

/// Order placement stub
///
/// Fulfillment itself happens at the factory; here an order with no items is
/// the failure case. Each item's price is added to the revenue counter.
async fn create_order(
    State(state): State<AppState>,
    Json(order): Json<OrderRequest>,
) -> Response {
    if order.items.is_empty() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "failed to fulfill order" })),
        )
            .into_response();
    }

    for item in &order.items {
        state.telemetry.metrics().add_revenue(item.price);
    }

    (StatusCode::OK, Json(json!({ "order": order }))).into_response()
}

/// Login stub: counts the authentication outcome and opens a session
async fn login(State(state): State<AppState>, Json(credentials): Json<LoginRequest>) -> Response {
    if credentials.email.is_empty() || credentials.password.is_empty() {
        state.telemetry.metrics().auth_failed();
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "email and password are required" })),
        )
            .into_response();
    }

    state.telemetry.metrics().auth_succeeded();
    state.telemetry.metrics().session_opened();

    (
        StatusCode::OK,
        Json(json!({ "user": { "email": credentials.email } })),
    )
        .into_response()
}

/// Logout stub: closes a session (floor-clamped at zero)
async fn logout(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.telemetry.metrics().session_closed();
    Json(json!({ "message": "logout successful" }))
}

async fn unknown_endpoint() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "unknown endpoint" })),
    )
        .into_response()
}
