//! Route handlers and router assembly.

pub mod account;
pub mod admin;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Build the full application router, including health endpoints.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .with_state(state)
}

/// API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/api/products", get(products::list))
        .route("/api/products/{id}", get(products::show))
        .route("/api/products/{id}/stock", get(products::stock))
        // Cart
        .route("/api/cart", get(cart::show).delete(cart::clear))
        .route("/api/cart/items", post(cart::add))
        .route(
            "/api/cart/items/{product_id}",
            put(cart::update).delete(cart::remove),
        )
        // Checkout
        .route("/api/checkout", post(checkout::submit))
        // Orders
        .route("/api/orders", get(orders::list))
        .route("/api/orders/{id}", get(orders::show))
        // Account
        .route("/api/account/role", get(account::role))
        .route(
            "/api/account/profile",
            get(account::profile).put(account::save_profile),
        )
        // Admin
        .route("/api/admin/products", post(admin::create_product))
        .route(
            "/api/admin/products/low-stock",
            get(admin::list_low_stock),
        )
        .route(
            "/api/admin/products/{id}",
            put(admin::update_product).delete(admin::delete_product),
        )
        .route("/api/admin/orders", get(admin::list_orders))
        .route("/api/admin/orders/{id}/status", put(admin::set_order_status))
        .route("/api/admin/users/{id}/role", put(admin::assign_role))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the gateway answers before returning OK.
/// Returns 503 Service Unavailable if it does not.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.gateway().list_products().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
