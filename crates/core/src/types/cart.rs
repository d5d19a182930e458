//! Cart types.
//!
//! The cart itself is owned by the authoritative store and mutated only
//! through the gateway operations; these are the value types it stores and
//! returns.

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// A stored cart line: product reference plus desired quantity.
///
/// A product appears at most once per cart; adding an already-present product
/// merges quantities instead of appending a duplicate entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product_id: ProductId,
    /// Always positive; bounded by live stock at every mutation.
    pub quantity: u32,
}

/// A cart entry joined with the live product it references.
///
/// Returned by the cart `Get` operation for display of current price and
/// stock. This is *not* the snapshot stored on past orders: the embedded
/// product reflects the catalog as it is right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// Line subtotal at the product's current price.
    ///
    /// Returns `None` if the multiplication overflows.
    #[must_use]
    pub fn subtotal(&self) -> Option<Price> {
        self.product.price.checked_mul(self.quantity)
    }
}
