//! Order route handlers for shoppers.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use tamarind_core::{Order, OrderId, OrderStatus, Price, ShippingDetails};

use crate::error::Result;
use crate::middleware::Identity;
use crate::state::AppState;

/// Order summary for listings.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummaryView {
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// Frozen total in minor units.
    pub total: u64,
    pub status: OrderStatus,
    pub item_count: usize,
}

impl From<&Order> for OrderSummaryView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            created_at: order.created_at,
            total: order.total.minor_units(),
            status: order.status,
            item_count: order.items.len(),
        }
    }
}

/// Frozen line item display data.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemView {
    pub product_id: String,
    pub name: String,
    /// Unit price at checkout time, minor units.
    pub price: u64,
    pub quantity: u32,
    /// Line subtotal at the frozen price, minor units.
    pub subtotal: u64,
}

/// Full order display data.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetailView {
    pub id: String,
    pub user: String,
    pub created_at: DateTime<Utc>,
    pub total: u64,
    pub total_display: String,
    pub status: OrderStatus,
    pub items: Vec<OrderItemView>,
    pub shipping: ShippingDetails,
}

impl From<&Order> for OrderDetailView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            user: order.user.to_string(),
            created_at: order.created_at,
            total: order.total.minor_units(),
            total_display: order.total.to_string(),
            status: order.status,
            items: order
                .items
                .iter()
                .map(|item| OrderItemView {
                    product_id: item.product_id.to_string(),
                    name: item.name.clone(),
                    price: item.price.minor_units(),
                    quantity: item.quantity,
                    subtotal: item.subtotal().unwrap_or(Price::ZERO).minor_units(),
                })
                .collect(),
            shipping: order.shipping.clone(),
        }
    }
}

/// The caller's own orders, most recent first.
#[instrument(skip(state, caller))]
pub async fn list(
    State(state): State<AppState>,
    Identity(caller): Identity,
) -> Result<Json<Vec<OrderSummaryView>>> {
    let orders = state.gateway().list_user_orders(&caller).await?;
    Ok(Json(orders.iter().map(OrderSummaryView::from).collect()))
}

/// Fetch one order, visible to its owner or an administrator.
#[instrument(skip(state, caller))]
pub async fn show(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Path(id): Path<String>,
) -> Result<Json<OrderDetailView>> {
    let order = state.gateway().get_order(&caller, &OrderId::new(id)).await?;
    Ok(Json(OrderDetailView::from(&order)))
}
