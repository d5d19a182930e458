//! Checkout route handler.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use tamarind_core::ShippingDetails;

use crate::error::Result;
use crate::middleware::Identity;
use crate::state::AppState;

/// Checkout request body: the shipping details captured for the order.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
}

/// Checkout response body.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order_id: String,
}

/// Convert the caller's cart into an order.
///
/// The gateway performs the whole conversion atomically; on any failure the
/// cart and all stock are untouched and the error maps straight through.
#[instrument(skip(state, caller, request))]
pub async fn submit(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>)> {
    let shipping = ShippingDetails {
        name: request.name,
        phone: request.phone,
        address: request.address,
        city: request.city,
    };

    let order_id = state.gateway().checkout(&caller, shipping).await?;

    // Stock changed; cached catalog listings are stale.
    state.invalidate_catalog();

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            order_id: order_id.into_string(),
        }),
    ))
}
