//! Reference in-memory implementation of the [`Gateway`] contract.
//!
//! # Atomicity
//!
//! All state lives under a single `RwLock`. Each gateway operation acquires
//! the lock exactly once and never awaits while holding it, which makes every
//! operation the indivisible unit the contract requires: concurrent checkouts
//! for the last unit of stock serialize here, and exactly one of them sees
//! the unit still available.
//!
//! # Concurrency policy
//!
//! Rapid quantity updates from the same user are last-write-wins: the client
//! issues no ordering of its own, and the final accepted call determines the
//! stored quantity. This is an accepted limitation, not a defect.

mod account;
mod cart;
mod catalog;
mod checkout;
mod orders;

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::instrument;

use tamarind_core::{
    CartEntry, CartItem, DomainResult, Order, OrderId, OrderStatus, Product, ProductCategory,
    ProductDraft, ProductId, ShippingDetails, UserId, UserProfile, UserRole,
};

use crate::gateway::{Caller, Gateway};

/// What `remove_from_cart` does when the product is not in the cart.
///
/// The reference behavior treats the absence as an error the caller may
/// ignore; idempotent removal is an acceptable alternative. Chosen at
/// construction and documented here rather than guessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalPolicy {
    /// Fail with `NotInCart` when the product is absent.
    #[default]
    Strict,
    /// Treat removal of an absent product as a no-op.
    Idempotent,
}

/// Authoritative shop state.
///
/// Products are keyed for deterministic listing order; orders append in
/// creation order, so "most recent first" is a reverse walk.
#[derive(Debug, Default)]
pub(crate) struct MarketState {
    pub(crate) products: BTreeMap<ProductId, Product>,
    pub(crate) carts: HashMap<UserId, Vec<CartEntry>>,
    pub(crate) orders: Vec<Order>,
    pub(crate) roles: HashMap<UserId, UserRole>,
    pub(crate) profiles: HashMap<UserId, UserProfile>,
}

impl MarketState {
    /// Resolve the caller's role: `Guest` for anonymous callers, the
    /// assigned role or `User` for signed-in ones.
    pub(crate) fn role_of(&self, caller: &Caller) -> UserRole {
        match caller.user_id() {
            None => UserRole::Guest,
            Some(id) => self.roles.get(id).copied().unwrap_or(UserRole::User),
        }
    }

    /// Require a signed-in caller.
    pub(crate) fn require_user<'a>(&self, caller: &'a Caller) -> DomainResult<&'a UserId> {
        caller.user_id().ok_or_else(|| {
            tamarind_core::DomainError::Unauthorized("sign in to use the cart".to_string())
        })
    }

    /// Require an administrator caller.
    pub(crate) fn require_admin<'a>(&self, caller: &'a Caller) -> DomainResult<&'a UserId> {
        let id = caller.user_id().ok_or_else(|| {
            tamarind_core::DomainError::Unauthorized("administrator access required".to_string())
        })?;
        if self.role_of(caller).is_admin() {
            Ok(id)
        } else {
            Err(tamarind_core::DomainError::Unauthorized(
                "administrator access required".to_string(),
            ))
        }
    }

    /// Look up a product or fail with `NotFound`.
    pub(crate) fn product(&self, id: &ProductId) -> DomainResult<&Product> {
        self.products
            .get(id)
            .ok_or_else(|| tamarind_core::DomainError::product_not_found(id))
    }
}

/// In-process authoritative store implementing [`Gateway`].
///
/// Cheap to clone via `Arc` at the call sites; the struct itself is kept
/// unshared so the lock is the only synchronization point.
pub struct MemoryGateway {
    state: RwLock<MarketState>,
    removal_policy: RemovalPolicy,
}

impl MemoryGateway {
    /// Create an empty store with no administrators.
    #[must_use]
    pub fn new() -> Self {
        Self::with_admins(std::iter::empty::<UserId>())
    }

    /// Create an empty store with the given bootstrap administrators.
    pub fn with_admins(admins: impl IntoIterator<Item = UserId>) -> Self {
        let mut roles = HashMap::new();
        for admin in admins {
            roles.insert(admin, UserRole::Admin);
        }
        Self {
            state: RwLock::new(MarketState {
                roles,
                ..MarketState::default()
            }),
            removal_policy: RemovalPolicy::default(),
        }
    }

    /// Override the removal policy (defaults to [`RemovalPolicy::Strict`]).
    #[must_use]
    pub const fn with_removal_policy(mut self, policy: RemovalPolicy) -> Self {
        self.removal_policy = policy;
        self
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, MarketState> {
        self.state.read().expect("state lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, MarketState> {
        self.state.write().expect("state lock poisoned")
    }
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    // =========================================================================
    // Catalog
    // =========================================================================

    #[instrument(skip(self))]
    async fn list_products(&self) -> DomainResult<Vec<Product>> {
        Ok(catalog::list(&self.read()))
    }

    #[instrument(skip(self))]
    async fn get_product(&self, id: &ProductId) -> DomainResult<Product> {
        self.read().product(id).cloned()
    }

    #[instrument(skip(self))]
    async fn list_products_by_category(
        &self,
        category: ProductCategory,
    ) -> DomainResult<Vec<Product>> {
        Ok(catalog::list_by_category(&self.read(), category))
    }

    #[instrument(skip(self))]
    async fn product_stock(&self, id: &ProductId) -> DomainResult<u32> {
        Ok(self.read().product(id)?.stock)
    }

    #[instrument(skip(self))]
    async fn list_low_stock_products(
        &self,
        caller: &Caller,
        threshold: u32,
    ) -> DomainResult<Vec<Product>> {
        catalog::list_low_stock(&self.read(), caller, threshold)
    }

    #[instrument(skip(self, draft))]
    async fn create_product(
        &self,
        caller: &Caller,
        draft: ProductDraft,
    ) -> DomainResult<ProductId> {
        catalog::create(&mut self.write(), caller, draft)
    }

    #[instrument(skip(self, draft))]
    async fn update_product(
        &self,
        caller: &Caller,
        id: &ProductId,
        draft: ProductDraft,
    ) -> DomainResult<()> {
        catalog::update(&mut self.write(), caller, id, draft)
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, caller: &Caller, id: &ProductId) -> DomainResult<()> {
        catalog::delete(&mut self.write(), caller, id)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    #[instrument(skip(self))]
    async fn get_cart(&self, caller: &Caller) -> DomainResult<Vec<CartItem>> {
        cart::get(&self.read(), caller)
    }

    #[instrument(skip(self))]
    async fn add_to_cart(
        &self,
        caller: &Caller,
        product_id: &ProductId,
        quantity: u32,
    ) -> DomainResult<()> {
        cart::add(&mut self.write(), caller, product_id, quantity)
    }

    #[instrument(skip(self))]
    async fn update_cart_quantity(
        &self,
        caller: &Caller,
        product_id: &ProductId,
        quantity: u32,
    ) -> DomainResult<()> {
        cart::update_quantity(&mut self.write(), caller, product_id, quantity)
    }

    #[instrument(skip(self))]
    async fn remove_from_cart(&self, caller: &Caller, product_id: &ProductId) -> DomainResult<()> {
        cart::remove(&mut self.write(), caller, product_id, self.removal_policy)
    }

    #[instrument(skip(self))]
    async fn clear_cart(&self, caller: &Caller) -> DomainResult<()> {
        cart::clear(&mut self.write(), caller)
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    #[instrument(skip(self, shipping))]
    async fn checkout(&self, caller: &Caller, shipping: ShippingDetails) -> DomainResult<OrderId> {
        checkout::run(&mut self.write(), caller, shipping)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    #[instrument(skip(self))]
    async fn get_order(&self, caller: &Caller, id: &OrderId) -> DomainResult<Order> {
        orders::get(&self.read(), caller, id)
    }

    #[instrument(skip(self))]
    async fn list_user_orders(&self, caller: &Caller) -> DomainResult<Vec<Order>> {
        orders::list_for_caller(&self.read(), caller)
    }

    #[instrument(skip(self))]
    async fn list_all_orders(&self, caller: &Caller) -> DomainResult<Vec<Order>> {
        orders::list_all(&self.read(), caller)
    }

    #[instrument(skip(self))]
    async fn list_orders_by_status(
        &self,
        caller: &Caller,
        status: OrderStatus,
    ) -> DomainResult<Vec<Order>> {
        orders::list_by_status(&self.read(), caller, status)
    }

    #[instrument(skip(self))]
    async fn update_order_status(
        &self,
        caller: &Caller,
        id: &OrderId,
        status: OrderStatus,
    ) -> DomainResult<()> {
        orders::update_status(&mut self.write(), caller, id, status)
    }

    // =========================================================================
    // Account
    // =========================================================================

    #[instrument(skip(self))]
    async fn caller_role(&self, caller: &Caller) -> DomainResult<UserRole> {
        Ok(self.read().role_of(caller))
    }

    #[instrument(skip(self))]
    async fn caller_profile(&self, caller: &Caller) -> DomainResult<Option<UserProfile>> {
        account::profile(&self.read(), caller)
    }

    #[instrument(skip(self, profile))]
    async fn save_caller_profile(&self, caller: &Caller, profile: UserProfile) -> DomainResult<()> {
        account::save_profile(&mut self.write(), caller, profile)
    }

    #[instrument(skip(self))]
    async fn assign_role(
        &self,
        caller: &Caller,
        user: &UserId,
        role: UserRole,
    ) -> DomainResult<()> {
        account::assign_role(&mut self.write(), caller, user, role)
    }
}
