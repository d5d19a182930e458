//! Order administration commands.

use std::str::FromStr;

use clap::Subcommand;
use serde_json::json;
use tamarind_core::OrderStatus;

use super::{Client, CliError};

#[derive(Subcommand)]
pub enum OrderAction {
    /// List orders, most recent first
    List {
        /// Filter by status (`pending`, `processing`, `shipped`, `delivered`)
        #[arg(long)]
        status: Option<String>,
    },
    /// Overwrite an order's fulfillment status
    SetStatus {
        /// Order id
        id: String,

        /// New status
        status: String,
    },
}

pub async fn run(client: &Client, action: OrderAction) -> Result<(), CliError> {
    match action {
        OrderAction::List { status } => {
            let path = match status.as_deref() {
                Some(raw) => {
                    // Validate locally for a friendlier error than a 400.
                    let status = OrderStatus::from_str(raw).map_err(CliError::Config)?;
                    format!("/api/admin/orders?status={status}")
                }
                None => "/api/admin/orders".to_string(),
            };

            let orders = client.get(&path).await?;
            let empty = Vec::new();
            let items = orders.as_array().unwrap_or(&empty);
            tracing::info!("{} order(s)", items.len());
            for order in items {
                tracing::info!(
                    "  {} - {} - {} item(s), total {} minor units",
                    order.get("id").and_then(|v| v.as_str()).unwrap_or("?"),
                    order.get("status").and_then(|v| v.as_str()).unwrap_or("?"),
                    order
                        .get("item_count")
                        .and_then(serde_json::Value::as_u64)
                        .unwrap_or(0),
                    order
                        .get("total")
                        .and_then(serde_json::Value::as_u64)
                        .unwrap_or(0),
                );
            }
        }
        OrderAction::SetStatus { id, status } => {
            let status = OrderStatus::from_str(&status).map_err(CliError::Config)?;
            client
                .put(
                    &format!("/api/admin/orders/{id}/status"),
                    &json!({ "status": status }),
                )
                .await?;
            tracing::info!("order {id} set to {status}");
        }
    }
    Ok(())
}
