//! Catalog product types.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::types::{Price, ProductCategory, ProductId};

/// Opaque handle to an externally stored image.
///
/// The handle resolves to a byte stream or a direct URL in the blob store;
/// nothing in this system interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Wrap an external blob handle.
    #[must_use]
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Get the raw handle.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A catalog product.
///
/// Mutated only by administrators, except `stock`, which checkout also
/// decrements. Orders never reference a `Product` directly; they freeze an
/// [`crate::OrderItem`] snapshot at checkout, so deleting a product cannot
/// orphan an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price in minor currency units.
    pub price: Price,
    pub category: ProductCategory,
    /// Remaining purchasable quantity. Never negative by construction.
    pub stock: u32,
    /// External blob handle for the product image.
    pub image: ImageRef,
    /// Contact phone for order questions.
    pub contact_phone: String,
}

/// Administrator-settable product fields, used for create and whole-record
/// update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: ProductCategory,
    pub stock: u32,
    pub image: ImageRef,
    pub contact_phone: String,
}

impl ProductDraft {
    /// Validate field presence.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] if the name is empty or
    /// whitespace-only.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation(
                "product name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Materialize the draft into a product with the given id.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            stock: self.stock,
            image: self.image,
            contact_phone: self.contact_phone,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Walnut Desk Lamp".to_string(),
            description: "Warm LED lamp with a walnut base".to_string(),
            price: Price::from_minor_units(4500),
            category: ProductCategory::Home,
            stock: 12,
            image: ImageRef::new("blob:lamp-01"),
            contact_phone: "+15550100".to_string(),
        }
    }

    #[test]
    fn test_draft_validation() {
        assert!(draft().validate().is_ok());

        let mut blank = draft();
        blank.name = "   ".to_string();
        assert!(matches!(
            blank.validate(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_into_product_keeps_fields() {
        let product = draft().into_product(ProductId::new("p-1"));
        assert_eq!(product.id, ProductId::new("p-1"));
        assert_eq!(product.stock, 12);
        assert_eq!(product.price, Price::from_minor_units(4500));
    }
}
