//! Domain error kinds.
//!
//! Every gateway operation surfaces failures through [`DomainError`]. All
//! variants are recoverable at the caller boundary: an operation that fails
//! leaves all state unchanged, and nothing here ever aborts the process.

use thiserror::Error;

use crate::types::ProductId;

/// Result alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// A failed domain operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Requested or retained quantity exceeds live stock.
    #[error("product {product_id} has {available} in stock, requested {requested}")]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// Mutation target is absent from the caller's cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Checkout attempted on an empty cart, including the case where a
    /// concurrent checkout already emptied it.
    #[error("cart is empty")]
    EmptyCart,

    /// Unknown product or order id.
    #[error("not found: {0}")]
    NotFound(String),

    /// Caller lacks the identity or role the operation requires.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Missing or invalid input fields.
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    /// `NotFound` for a product id.
    #[must_use]
    pub fn product_not_found(id: &ProductId) -> Self {
        Self::NotFound(format!("product {id}"))
    }

    /// `NotFound` for an order id.
    #[must_use]
    pub fn order_not_found(id: &crate::types::OrderId) -> Self {
        Self::NotFound(format!("order {id}"))
    }
}
