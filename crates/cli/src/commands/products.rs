//! Product management commands.

use std::str::FromStr;

use clap::Subcommand;
use serde_json::json;
use tamarind_core::ProductCategory;

use super::{Client, CliError};

#[derive(Subcommand)]
pub enum ProductAction {
    /// Create a product
    Create {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Product description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Unit price in minor currency units (e.g., cents)
        #[arg(short, long)]
        price: u64,

        /// Category (`electronics`, `clothing`, `home`, `books`, `sports`)
        #[arg(short, long)]
        category: String,

        /// Initial stock
        #[arg(short, long)]
        stock: u32,

        /// Image blob handle
        #[arg(short, long, default_value = "")]
        image: String,

        /// Contact phone for order questions
        #[arg(long, default_value = "")]
        phone: String,
    },
    /// Replace a product's fields
    Update {
        /// Product id
        id: String,

        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Unit price in minor currency units
        #[arg(short, long)]
        price: u64,

        #[arg(short, long)]
        category: String,

        #[arg(short, long)]
        stock: u32,

        #[arg(short, long, default_value = "")]
        image: String,

        #[arg(long, default_value = "")]
        phone: String,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },
    /// List products at or below a stock threshold
    LowStock {
        /// Inclusive stock threshold
        #[arg(long, default_value_t = 5)]
        threshold: u32,
    },
}

pub async fn run(client: &Client, action: ProductAction) -> Result<(), CliError> {
    match action {
        ProductAction::Create {
            name,
            description,
            price,
            category,
            stock,
            image,
            phone,
        } => {
            let payload = payload(&name, &description, price, &category, stock, &image, &phone)?;
            let created = client.post("/api/admin/products", &payload).await?;
            let id = created
                .get("id")
                .and_then(|v| v.as_str())
                .unwrap_or_default();
            tracing::info!("created product {id}: {name}");
        }
        ProductAction::Update {
            id,
            name,
            description,
            price,
            category,
            stock,
            image,
            phone,
        } => {
            let payload = payload(&name, &description, price, &category, stock, &image, &phone)?;
            client
                .put(&format!("/api/admin/products/{id}"), &payload)
                .await?;
            tracing::info!("updated product {id}");
        }
        ProductAction::Delete { id } => {
            client.delete(&format!("/api/admin/products/{id}")).await?;
            tracing::info!("deleted product {id}");
        }
        ProductAction::LowStock { threshold } => {
            let products = client
                .get(&format!("/api/admin/products/low-stock?threshold={threshold}"))
                .await?;
            let empty = Vec::new();
            let items = products.as_array().unwrap_or(&empty);
            tracing::info!("{} product(s) at or below stock {threshold}", items.len());
            for product in items {
                tracing::info!(
                    "  {} - {} (stock {})",
                    product.get("id").and_then(|v| v.as_str()).unwrap_or("?"),
                    product.get("name").and_then(|v| v.as_str()).unwrap_or("?"),
                    product.get("stock").and_then(serde_json::Value::as_u64).unwrap_or(0),
                );
            }
        }
    }
    Ok(())
}

fn payload(
    name: &str,
    description: &str,
    price: u64,
    category: &str,
    stock: u32,
    image: &str,
    phone: &str,
) -> Result<serde_json::Value, CliError> {
    // Validate the category locally for a friendlier error than a 400.
    let category = ProductCategory::from_str(category).map_err(CliError::Config)?;
    Ok(json!({
        "name": name,
        "description": description,
        "price": price,
        "category": category,
        "stock": stock,
        "image": image,
        "contact_phone": phone,
    }))
}
