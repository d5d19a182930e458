//! The gateway contract: every remote operation the shop consists of.
//!
//! Caller identity is explicit on every operation - there is no ambient
//! current-user state. Authorization is enforced behind this boundary, not in
//! the presentation layer: a handler may pre-check a role for a friendlier
//! error, but the gateway rejects unauthorized calls regardless.

use async_trait::async_trait;

use tamarind_core::{
    CartItem, DomainResult, Order, OrderId, OrderStatus, Product, ProductCategory, ProductDraft,
    ProductId, ShippingDetails, UserId, UserProfile, UserRole,
};

/// The identity a request arrives with.
///
/// Identity issuance belongs to the external identity layer; by the time a
/// caller reaches the gateway it is either anonymous or a verified user id.
/// Roles are resolved by the store, not carried by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Caller {
    /// Anonymous; may browse the catalog only.
    Guest,
    /// A verified user id.
    User(UserId),
}

impl Caller {
    /// Convenience constructor for a signed-in caller.
    #[must_use]
    pub fn user(id: impl Into<String>) -> Self {
        Self::User(UserId::new(id))
    }

    /// The caller's user id, if signed in.
    #[must_use]
    pub const fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::User(id) => Some(id),
            Self::Guest => None,
        }
    }
}

/// The remote-call boundary of the shop.
///
/// Every method is one indivisible operation: it either fully succeeds or
/// fully fails with no partial visible effect. Implementations must
/// re-validate against their *current* state inside the operation rather
/// than trusting anything the caller previously read - stock may have
/// changed since the cart was last touched.
#[async_trait]
pub trait Gateway: Send + Sync {
    // =========================================================================
    // Catalog
    // =========================================================================

    /// List the whole catalog.
    async fn list_products(&self) -> DomainResult<Vec<Product>>;

    /// Fetch a single product.
    async fn get_product(&self, id: &ProductId) -> DomainResult<Product>;

    /// List products in one category.
    async fn list_products_by_category(
        &self,
        category: ProductCategory,
    ) -> DomainResult<Vec<Product>>;

    /// Current stock of a product.
    async fn product_stock(&self, id: &ProductId) -> DomainResult<u32>;

    /// Products at or below the given stock threshold. Administrator-only.
    async fn list_low_stock_products(
        &self,
        caller: &Caller,
        threshold: u32,
    ) -> DomainResult<Vec<Product>>;

    /// Create a product. Administrator-only. Returns the minted id.
    async fn create_product(
        &self,
        caller: &Caller,
        draft: ProductDraft,
    ) -> DomainResult<ProductId>;

    /// Replace a product's administrator-settable fields. Administrator-only.
    async fn update_product(
        &self,
        caller: &Caller,
        id: &ProductId,
        draft: ProductDraft,
    ) -> DomainResult<()>;

    /// Delete a product. Administrator-only.
    ///
    /// Existing orders keep their frozen snapshots; live carts drop the
    /// product in the same atomic operation.
    async fn delete_product(&self, caller: &Caller, id: &ProductId) -> DomainResult<()>;

    // =========================================================================
    // Cart
    // =========================================================================

    /// The caller's cart, each entry joined with the live product.
    async fn get_cart(&self, caller: &Caller) -> DomainResult<Vec<CartItem>>;

    /// Add a quantity of a product to the caller's cart, merging with an
    /// existing entry for the same product.
    async fn add_to_cart(
        &self,
        caller: &Caller,
        product_id: &ProductId,
        quantity: u32,
    ) -> DomainResult<()>;

    /// Set an existing cart entry to an explicit quantity.
    async fn update_cart_quantity(
        &self,
        caller: &Caller,
        product_id: &ProductId,
        quantity: u32,
    ) -> DomainResult<()>;

    /// Remove a product from the caller's cart.
    async fn remove_from_cart(&self, caller: &Caller, product_id: &ProductId) -> DomainResult<()>;

    /// Empty the caller's cart unconditionally.
    async fn clear_cart(&self, caller: &Caller) -> DomainResult<()>;

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Atomically convert the caller's cart into an order.
    ///
    /// Re-validates every line against live stock, freezes item snapshots at
    /// current prices, decrements stock, creates the order as `pending`, and
    /// empties the cart - or fails leaving stock and cart untouched.
    async fn checkout(&self, caller: &Caller, shipping: ShippingDetails) -> DomainResult<OrderId>;

    // =========================================================================
    // Orders
    // =========================================================================

    /// Fetch an order, visible to its owner or an administrator.
    async fn get_order(&self, caller: &Caller, id: &OrderId) -> DomainResult<Order>;

    /// The caller's own orders, most recent first.
    async fn list_user_orders(&self, caller: &Caller) -> DomainResult<Vec<Order>>;

    /// Every order, most recent first. Administrator-only.
    async fn list_all_orders(&self, caller: &Caller) -> DomainResult<Vec<Order>>;

    /// Orders with the given status, most recent first. Administrator-only.
    async fn list_orders_by_status(
        &self,
        caller: &Caller,
        status: OrderStatus,
    ) -> DomainResult<Vec<Order>>;

    /// Overwrite an order's status. Administrator-only and idempotent;
    /// any status may be assigned regardless of the current one.
    async fn update_order_status(
        &self,
        caller: &Caller,
        id: &OrderId,
        status: OrderStatus,
    ) -> DomainResult<()>;

    // =========================================================================
    // Account
    // =========================================================================

    /// The caller's resolved role.
    async fn caller_role(&self, caller: &Caller) -> DomainResult<UserRole>;

    /// The caller's saved profile, if any.
    async fn caller_profile(&self, caller: &Caller) -> DomainResult<Option<UserProfile>>;

    /// Save or replace the caller's profile.
    async fn save_caller_profile(&self, caller: &Caller, profile: UserProfile) -> DomainResult<()>;

    /// Assign a role to a user. Administrator-only.
    async fn assign_role(
        &self,
        caller: &Caller,
        user: &UserId,
        role: UserRole,
    ) -> DomainResult<()>;
}
