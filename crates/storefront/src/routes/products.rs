//! Catalog route handlers.
//!
//! Listing endpoints read through the catalog display cache; the product
//! detail and stock probes always hit the gateway so shoppers see live data
//! before a cart mutation.

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use tamarind_core::{Product, ProductCategory, ProductId};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Product display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Unit price in minor currency units.
    pub price: u64,
    /// Formatted price for display.
    pub price_display: String,
    pub category: ProductCategory,
    pub stock: u32,
    /// Opaque blob handle for the product image.
    pub image: String,
    pub contact_phone: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.minor_units(),
            price_display: product.price.to_string(),
            category: product.category,
            stock: product.stock,
            image: product.image.as_str().to_string(),
            contact_phone: product.contact_phone.clone(),
        }
    }
}

/// Catalog list query parameters.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub category: Option<String>,
}

/// Stock probe response.
#[derive(Debug, Serialize)]
pub struct StockView {
    pub product_id: String,
    pub stock: u32,
}

/// List the catalog, optionally filtered by category.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<Vec<ProductView>>> {
    let category = query
        .category
        .as_deref()
        .map(ProductCategory::from_str)
        .transpose()
        .map_err(ApiError::BadRequest)?;

    let products = state.catalog_listing(category).await?;
    Ok(Json(products.iter().map(ProductView::from).collect()))
}

/// Fetch a single product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductView>> {
    let product = state.gateway().get_product(&ProductId::new(id)).await?;
    Ok(Json(ProductView::from(&product)))
}

/// Live stock of a single product.
#[instrument(skip(state))]
pub async fn stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StockView>> {
    let product_id = ProductId::new(id);
    let stock = state.gateway().product_stock(&product_id).await?;
    Ok(Json(StockView {
        product_id: product_id.into_string(),
        stock,
    }))
}
