//! Order types: shipping details, frozen line items, and the order record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::types::{OrderId, OrderStatus, Price, ProductId, UserId};

/// Shipping details captured once per order.
///
/// Immutable after order creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
}

impl ShippingDetails {
    /// Validate that every field is present and non-empty.
    ///
    /// Whitespace-only values count as empty.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] naming the first missing field.
    pub fn validate(&self) -> DomainResult<()> {
        require_field("name", &self.name)?;
        require_field("phone", &self.phone)?;
        require_field("address", &self.address)?;
        require_field("city", &self.city)?;
        Ok(())
    }
}

/// Reject empty or whitespace-only required fields.
pub(crate) fn require_field(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

/// A frozen line item on an order.
///
/// Captured at checkout from the live product; later product mutation or
/// deletion never changes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    /// Unit price at checkout time.
    pub price: Price,
    pub quantity: u32,
}

impl OrderItem {
    /// Line subtotal at the frozen unit price.
    #[must_use]
    pub fn subtotal(&self) -> Option<Price> {
        self.price.checked_mul(self.quantity)
    }
}

/// An immutable record of a completed purchase.
///
/// Created exactly once, by checkout. `status` is the only field an
/// administrator may later mutate; everything else is frozen, including
/// `total`, which is never recomputed from live catalog data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user: UserId,
    pub created_at: DateTime<Utc>,
    /// Sum of frozen line-item subtotals, computed at checkout.
    pub total: Price,
    /// Never empty.
    pub items: Vec<OrderItem>,
    pub shipping: ShippingDetails,
    pub status: OrderStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shipping() -> ShippingDetails {
        ShippingDetails {
            name: "Ada Osei".to_string(),
            phone: "+233200000001".to_string(),
            address: "4 Harbor Lane".to_string(),
            city: "Tema".to_string(),
        }
    }

    #[test]
    fn test_shipping_validation_accepts_complete_details() {
        assert!(shipping().validate().is_ok());
    }

    #[test]
    fn test_shipping_validation_rejects_each_missing_field() {
        for field in ["name", "phone", "address", "city"] {
            let mut details = shipping();
            match field {
                "name" => details.name = String::new(),
                "phone" => details.phone = "  ".to_string(),
                "address" => details.address = String::new(),
                _ => details.city = "\t".to_string(),
            }
            let err = details.validate().unwrap_err();
            assert!(
                err.to_string().contains(field),
                "expected {field} in {err}"
            );
        }
    }

    #[test]
    fn test_order_item_subtotal() {
        let item = OrderItem {
            product_id: ProductId::new("p-1"),
            name: "Trail Bottle".to_string(),
            price: Price::from_minor_units(1200),
            quantity: 2,
        };
        assert_eq!(item.subtotal(), Some(Price::from_minor_units(2400)));
    }
}
