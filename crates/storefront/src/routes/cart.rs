//! Cart route handlers.
//!
//! Every mutation is forwarded to the gateway, which re-validates against
//! live stock; nothing here trusts a previously fetched listing.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use tamarind_core::{CartItem, Price, ProductId};

use crate::error::Result;
use crate::middleware::Identity;
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    /// Current unit price in minor units.
    pub unit_price: u64,
    /// Line subtotal in minor units at the current price.
    pub line_price: u64,
    /// Live stock, for quantity steppers.
    pub stock: u32,
    pub image: String,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product.id.to_string(),
            name: item.product.name.clone(),
            quantity: item.quantity,
            unit_price: item.product.price.minor_units(),
            line_price: item.subtotal().unwrap_or(Price::ZERO).minor_units(),
            stock: item.product.stock,
            image: item.product.image.as_str().to_string(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    /// Sum of line subtotals in minor units at current prices.
    pub subtotal: u64,
    pub item_count: u32,
}

impl CartView {
    fn from_items(items: &[CartItem]) -> Self {
        let views: Vec<CartItemView> = items.iter().map(CartItemView::from).collect();
        Self {
            subtotal: views.iter().map(|v| v.line_price).sum(),
            item_count: views.iter().map(|v| v.quantity).sum(),
            items: views,
        }
    }
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: String,
    /// Defaults to 1 when omitted.
    pub quantity: Option<u32>,
}

/// Quantity update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

/// Display the caller's cart.
#[instrument(skip(state, caller))]
pub async fn show(
    State(state): State<AppState>,
    Identity(caller): Identity,
) -> Result<Json<CartView>> {
    let items = state.gateway().get_cart(&caller).await?;
    Ok(Json(CartView::from_items(&items)))
}

/// Add an item to the caller's cart.
#[instrument(skip(state, caller, request))]
pub async fn add(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Json(request): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<CartView>)> {
    let product_id = ProductId::new(request.product_id);
    let quantity = request.quantity.unwrap_or(1);
    state
        .gateway()
        .add_to_cart(&caller, &product_id, quantity)
        .await?;

    let items = state.gateway().get_cart(&caller).await?;
    Ok((StatusCode::CREATED, Json(CartView::from_items(&items))))
}

/// Set an item's quantity.
#[instrument(skip(state, caller, request))]
pub async fn update(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Path(product_id): Path<String>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<CartView>> {
    let product_id = ProductId::new(product_id);
    state
        .gateway()
        .update_cart_quantity(&caller, &product_id, request.quantity)
        .await?;

    let items = state.gateway().get_cart(&caller).await?;
    Ok(Json(CartView::from_items(&items)))
}

/// Remove an item from the cart.
#[instrument(skip(state, caller))]
pub async fn remove(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Path(product_id): Path<String>,
) -> Result<Json<CartView>> {
    let product_id = ProductId::new(product_id);
    state
        .gateway()
        .remove_from_cart(&caller, &product_id)
        .await?;

    let items = state.gateway().get_cart(&caller).await?;
    Ok(Json(CartView::from_items(&items)))
}

/// Empty the cart.
#[instrument(skip(state, caller))]
pub async fn clear(
    State(state): State<AppState>,
    Identity(caller): Identity,
) -> Result<StatusCode> {
    state.gateway().clear_cart(&caller).await?;
    Ok(StatusCode::NO_CONTENT)
}
