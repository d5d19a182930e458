//! Administrator route handlers.
//!
//! Authorization lives in the gateway: these handlers pass the caller
//! through and let the store reject non-administrators, so the rule is
//! enforced in exactly one place.

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use tamarind_core::{
    ImageRef, OrderId, OrderStatus, Price, ProductCategory, ProductDraft, ProductId, UserId,
    UserRole,
};

use crate::error::{ApiError, Result};
use crate::middleware::Identity;
use crate::routes::orders::OrderSummaryView;
use crate::routes::products::ProductView;
use crate::state::AppState;

/// Product create/update request body.
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    /// Unit price in minor currency units.
    pub price: u64,
    pub category: ProductCategory,
    pub stock: u32,
    /// Opaque blob handle from the image store.
    pub image: String,
    pub contact_phone: String,
}

impl From<ProductPayload> for ProductDraft {
    fn from(payload: ProductPayload) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
            price: Price::from_minor_units(payload.price),
            category: payload.category,
            stock: payload.stock,
            image: ImageRef::new(payload.image),
            contact_phone: payload.contact_phone,
        }
    }
}

/// Create-product response body.
#[derive(Debug, Serialize)]
pub struct CreatedProduct {
    pub id: String,
}

/// Low-stock listing query parameters.
#[derive(Debug, Deserialize)]
pub struct LowStockQuery {
    /// Inclusive stock threshold (default 5).
    pub threshold: Option<u32>,
}

/// Admin order listing query parameters.
#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<String>,
}

/// Status update request body.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: OrderStatus,
}

/// Role assignment request body.
#[derive(Debug, Deserialize)]
pub struct AssignRoleRequest {
    pub role: UserRole,
}

/// Create a product.
#[instrument(skip(state, caller, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, Json<CreatedProduct>)> {
    let id = state
        .gateway()
        .create_product(&caller, payload.into())
        .await?;
    state.invalidate_catalog();
    Ok((
        StatusCode::CREATED,
        Json(CreatedProduct {
            id: id.into_string(),
        }),
    ))
}

/// Replace a product's fields.
#[instrument(skip(state, caller, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Path(id): Path<String>,
    Json(payload): Json<ProductPayload>,
) -> Result<StatusCode> {
    state
        .gateway()
        .update_product(&caller, &ProductId::new(id), payload.into())
        .await?;
    state.invalidate_catalog();
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a product.
#[instrument(skip(state, caller))]
pub async fn delete_product(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state
        .gateway()
        .delete_product(&caller, &ProductId::new(id))
        .await?;
    state.invalidate_catalog();
    Ok(StatusCode::NO_CONTENT)
}

/// Products at or below the stock threshold.
#[instrument(skip(state, caller))]
pub async fn list_low_stock(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Query(query): Query<LowStockQuery>,
) -> Result<Json<Vec<ProductView>>> {
    let products = state
        .gateway()
        .list_low_stock_products(&caller, query.threshold.unwrap_or(5))
        .await?;
    Ok(Json(products.iter().map(ProductView::from).collect()))
}

/// All orders, optionally filtered by status, most recent first.
#[instrument(skip(state, caller))]
pub async fn list_orders(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<Vec<OrderSummaryView>>> {
    let orders = match query.status.as_deref() {
        Some(raw) => {
            let status = OrderStatus::from_str(raw).map_err(ApiError::BadRequest)?;
            state.gateway().list_orders_by_status(&caller, status).await?
        }
        None => state.gateway().list_all_orders(&caller).await?,
    };
    Ok(Json(orders.iter().map(OrderSummaryView::from).collect()))
}

/// Overwrite an order's fulfillment status.
#[instrument(skip(state, caller, request))]
pub async fn set_order_status(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Path(id): Path<String>,
    Json(request): Json<SetStatusRequest>,
) -> Result<StatusCode> {
    state
        .gateway()
        .update_order_status(&caller, &OrderId::new(id), request.status)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Assign a role to a user.
#[instrument(skip(state, caller, request))]
pub async fn assign_role(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Path(id): Path<String>,
    Json(request): Json<AssignRoleRequest>,
) -> Result<StatusCode> {
    state
        .gateway()
        .assign_role(&caller, &UserId::new(id), request.role)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
