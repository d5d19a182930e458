//! Catalog operations: listing, lookup, and administrator mutation.

use tamarind_core::{DomainResult, Product, ProductCategory, ProductDraft, ProductId};
use uuid::Uuid;

use super::MarketState;
use crate::gateway::Caller;

pub(super) fn list(state: &MarketState) -> Vec<Product> {
    state.products.values().cloned().collect()
}

pub(super) fn list_by_category(state: &MarketState, category: ProductCategory) -> Vec<Product> {
    state
        .products
        .values()
        .filter(|p| p.category == category)
        .cloned()
        .collect()
}

pub(super) fn list_low_stock(
    state: &MarketState,
    caller: &Caller,
    threshold: u32,
) -> DomainResult<Vec<Product>> {
    state.require_admin(caller)?;
    Ok(state
        .products
        .values()
        .filter(|p| p.stock <= threshold)
        .cloned()
        .collect())
}

pub(super) fn create(
    state: &mut MarketState,
    caller: &Caller,
    draft: ProductDraft,
) -> DomainResult<ProductId> {
    state.require_admin(caller)?;
    draft.validate()?;

    let id = ProductId::new(Uuid::new_v4().to_string());
    let product = draft.into_product(id.clone());
    tracing::info!(product_id = %id, name = %product.name, "product created");
    state.products.insert(id.clone(), product);
    Ok(id)
}

pub(super) fn update(
    state: &mut MarketState,
    caller: &Caller,
    id: &ProductId,
    draft: ProductDraft,
) -> DomainResult<()> {
    state.require_admin(caller)?;
    draft.validate()?;
    state.product(id)?;

    state
        .products
        .insert(id.clone(), draft.into_product(id.clone()));
    tracing::info!(product_id = %id, "product updated");
    Ok(())
}

/// Delete a product and strip it from every live cart.
///
/// Orders are untouched: they hold frozen snapshots, not references.
pub(super) fn delete(state: &mut MarketState, caller: &Caller, id: &ProductId) -> DomainResult<()> {
    state.require_admin(caller)?;
    state.product(id)?;

    state.products.remove(id);
    for entries in state.carts.values_mut() {
        entries.retain(|entry| entry.product_id != *id);
    }
    tracing::info!(product_id = %id, "product deleted");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tamarind_core::{DomainError, ImageRef, Price};

    use super::*;
    use crate::memory::tests::{admin, draft, shopper, state_with_admin};

    #[test]
    fn test_create_requires_admin() {
        let mut state = state_with_admin();
        let err = create(&mut state, &shopper(), draft("Lamp", 1000, 5)).unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
        assert!(matches!(
            create(&mut state, &Caller::Guest, draft("Lamp", 1000, 5)),
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_create_and_lookup() {
        let mut state = state_with_admin();
        let id = create(&mut state, &admin(), draft("Lamp", 4500, 12)).unwrap();
        let product = state.product(&id).unwrap();
        assert_eq!(product.name, "Lamp");
        assert_eq!(product.stock, 12);
    }

    #[test]
    fn test_update_replaces_whole_record() {
        let mut state = state_with_admin();
        let id = create(&mut state, &admin(), draft("Lamp", 4500, 12)).unwrap();

        let mut replacement = draft("Desk Lamp", 4900, 8);
        replacement.image = ImageRef::new("blob:lamp-02");
        update(&mut state, &admin(), &id, replacement).unwrap();

        let product = state.product(&id).unwrap();
        assert_eq!(product.name, "Desk Lamp");
        assert_eq!(product.price, Price::from_minor_units(4900));
        assert_eq!(product.stock, 8);
        assert_eq!(product.image.as_str(), "blob:lamp-02");
    }

    #[test]
    fn test_update_unknown_product() {
        let mut state = state_with_admin();
        let err = update(
            &mut state,
            &admin(),
            &ProductId::new("missing"),
            draft("Lamp", 100, 1),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn test_delete_strips_product_from_carts() {
        let mut state = state_with_admin();
        let id = create(&mut state, &admin(), draft("Lamp", 4500, 12)).unwrap();
        crate::memory::cart::add(&mut state, &shopper(), &id, 2).unwrap();

        delete(&mut state, &admin(), &id).unwrap();

        assert!(state.product(&id).is_err());
        let entries = state.carts.values().flatten().count();
        assert_eq!(entries, 0);
    }

    #[test]
    fn test_low_stock_threshold_is_inclusive() {
        let mut state = state_with_admin();
        create(&mut state, &admin(), draft("Low", 100, 2)).unwrap();
        create(&mut state, &admin(), draft("High", 100, 9)).unwrap();

        let low = list_low_stock(&state, &admin(), 2).unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low.first().unwrap().name, "Low");

        assert!(matches!(
            list_low_stock(&state, &shopper(), 2),
            Err(DomainError::Unauthorized(_))
        ));
    }
}
