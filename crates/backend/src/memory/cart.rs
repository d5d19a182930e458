//! Cart aggregate operations.
//!
//! Every mutating operation re-reads live stock from the catalog at the
//! moment of the call - the cart never caches a stale stock ceiling.
//! Exceeding stock fails with `OutOfStock`; quantities are never silently
//! clamped.

use tamarind_core::{CartEntry, CartItem, DomainError, DomainResult, ProductId};

use super::{MarketState, RemovalPolicy};
use crate::gateway::Caller;

/// The caller's cart, each entry joined with the live product.
pub(super) fn get(state: &MarketState, caller: &Caller) -> DomainResult<Vec<CartItem>> {
    let user = state.require_user(caller)?;
    let entries = state.carts.get(user).map(Vec::as_slice).unwrap_or_default();
    Ok(entries
        .iter()
        .filter_map(|entry| {
            state.products.get(&entry.product_id).map(|product| CartItem {
                product: product.clone(),
                quantity: entry.quantity,
            })
        })
        .collect())
}

/// Add `quantity` of a product, merging with an existing entry.
pub(super) fn add(
    state: &mut MarketState,
    caller: &Caller,
    product_id: &ProductId,
    quantity: u32,
) -> DomainResult<()> {
    let user = state.require_user(caller)?.clone();
    require_positive(quantity)?;
    let stock = state.product(product_id)?.stock;

    let entries = state.carts.entry(user).or_default();
    let held = entries
        .iter()
        .find(|entry| entry.product_id == *product_id)
        .map_or(0, |entry| entry.quantity);

    // Widen before adding so a huge request cannot wrap.
    let wanted = u64::from(held) + u64::from(quantity);
    if wanted > u64::from(stock) {
        return Err(DomainError::OutOfStock {
            product_id: product_id.clone(),
            requested: quantity,
            available: stock.saturating_sub(held),
        });
    }

    #[allow(clippy::cast_possible_truncation)] // wanted <= stock <= u32::MAX
    let merged = wanted as u32;
    match entries
        .iter_mut()
        .find(|entry| entry.product_id == *product_id)
    {
        Some(entry) => entry.quantity = merged,
        None => entries.push(CartEntry {
            product_id: product_id.clone(),
            quantity: merged,
        }),
    }
    Ok(())
}

/// Set an existing entry to an explicit quantity (last write wins).
pub(super) fn update_quantity(
    state: &mut MarketState,
    caller: &Caller,
    product_id: &ProductId,
    quantity: u32,
) -> DomainResult<()> {
    let user = state.require_user(caller)?.clone();
    require_positive(quantity)?;
    let stock = state.product(product_id)?.stock;

    if quantity > stock {
        return Err(DomainError::OutOfStock {
            product_id: product_id.clone(),
            requested: quantity,
            available: stock,
        });
    }

    let entry = state
        .carts
        .get_mut(&user)
        .and_then(|entries| {
            entries
                .iter_mut()
                .find(|entry| entry.product_id == *product_id)
        })
        .ok_or_else(|| DomainError::NotInCart(product_id.clone()))?;
    entry.quantity = quantity;
    Ok(())
}

/// Remove a product from the cart, honoring the configured policy for an
/// absent product.
pub(super) fn remove(
    state: &mut MarketState,
    caller: &Caller,
    product_id: &ProductId,
    policy: RemovalPolicy,
) -> DomainResult<()> {
    let user = state.require_user(caller)?.clone();
    let entries = state.carts.entry(user).or_default();
    let before = entries.len();
    entries.retain(|entry| entry.product_id != *product_id);

    if entries.len() == before && policy == RemovalPolicy::Strict {
        return Err(DomainError::NotInCart(product_id.clone()));
    }
    Ok(())
}

/// Empty the cart unconditionally.
pub(super) fn clear(state: &mut MarketState, caller: &Caller) -> DomainResult<()> {
    let user = state.require_user(caller)?.clone();
    state.carts.remove(&user);
    Ok(())
}

fn require_positive(quantity: u32) -> DomainResult<()> {
    if quantity == 0 {
        return Err(DomainError::Validation(
            "quantity must be at least 1".to_string(),
        ));
    }
    Ok(())
}
