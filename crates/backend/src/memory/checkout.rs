//! Checkout: the atomic conversion of a cart into an order.
//!
//! The operation runs in two passes over the cart while the state lock is
//! held. The first pass only reads: it re-validates every line against live
//! stock and prices the order. Mutation starts only after the whole cart has
//! validated, so any failure leaves stock and cart exactly as they were.

use chrono::Utc;
use tamarind_core::{
    DomainError, DomainResult, Order, OrderId, OrderItem, OrderStatus, Price, ShippingDetails,
};
use uuid::Uuid;

use super::MarketState;
use crate::gateway::Caller;

pub(super) fn run(
    state: &mut MarketState,
    caller: &Caller,
    shipping: ShippingDetails,
) -> DomainResult<OrderId> {
    let user = state.require_user(caller)?.clone();
    shipping.validate()?;

    let entries = state.carts.get(&user).map(Vec::as_slice).unwrap_or_default();
    if entries.is_empty() {
        // Also hit by the second of two racing checkouts: the winner emptied
        // the cart, so the loser must not mint a zero-item order.
        return Err(DomainError::EmptyCart);
    }

    // Pass 1: re-validate against current stock and freeze the line items at
    // current prices. No mutation yet.
    let mut items = Vec::with_capacity(entries.len());
    let mut total = Price::ZERO;
    for entry in entries {
        let product = state.product(&entry.product_id)?;
        if entry.quantity > product.stock {
            return Err(DomainError::OutOfStock {
                product_id: entry.product_id.clone(),
                requested: entry.quantity,
                available: product.stock,
            });
        }

        let subtotal = product
            .price
            .checked_mul(entry.quantity)
            .ok_or_else(|| DomainError::Validation("order subtotal overflow".to_string()))?;
        total = total
            .checked_add(subtotal)
            .ok_or_else(|| DomainError::Validation("order total overflow".to_string()))?;
        items.push(OrderItem {
            product_id: entry.product_id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity: entry.quantity,
        });
    }

    // Pass 2: every line validated; apply all effects.
    for item in &items {
        if let Some(product) = state.products.get_mut(&item.product_id) {
            product.stock -= item.quantity;
        }
    }

    let order_id = OrderId::new(Uuid::new_v4().to_string());
    let order = Order {
        id: order_id.clone(),
        user: user.clone(),
        created_at: Utc::now(),
        total,
        items,
        shipping,
        status: OrderStatus::Pending,
    };
    tracing::info!(order_id = %order_id, user = %user, total = %total, "order placed");
    state.orders.push(order);
    state.carts.remove(&user);

    Ok(order_id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tamarind_core::{ProductId, UserId};

    use super::*;
    use crate::memory::tests::{admin, draft, shopper, state_with_admin};
    use crate::memory::{cart, catalog};

    fn shipping() -> ShippingDetails {
        ShippingDetails {
            name: "Ada Osei".to_string(),
            phone: "+233200000001".to_string(),
            address: "4 Harbor Lane".to_string(),
            city: "Tema".to_string(),
        }
    }

    #[test]
    fn test_checkout_happy_path() {
        let mut state = state_with_admin();
        let p1 = catalog::create(&mut state, &admin(), draft("P1", 100, 5)).unwrap();
        cart::add(&mut state, &shopper(), &p1, 2).unwrap();

        let order_id = run(&mut state, &shopper(), shipping()).unwrap();

        let order = state.orders.iter().find(|o| o.id == order_id).unwrap();
        assert_eq!(order.total, Price::from_minor_units(200));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.user, UserId::new("shopper-1"));
        assert_eq!(state.product(&p1).unwrap().stock, 3);
        assert!(cart::get(&state, &shopper()).unwrap().is_empty());
    }

    #[test]
    fn test_checkout_guest_is_unauthorized() {
        let mut state = state_with_admin();
        assert!(matches!(
            run(&mut state, &Caller::Guest, shipping()),
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_checkout_empty_cart() {
        let mut state = state_with_admin();
        assert_eq!(
            run(&mut state, &shopper(), shipping()).unwrap_err(),
            DomainError::EmptyCart,
        );
    }

    #[test]
    fn test_checkout_rejects_invalid_shipping_before_any_effect() {
        let mut state = state_with_admin();
        let p1 = catalog::create(&mut state, &admin(), draft("P1", 100, 5)).unwrap();
        cart::add(&mut state, &shopper(), &p1, 2).unwrap();

        let bad = ShippingDetails {
            city: String::new(),
            ..shipping()
        };
        assert!(matches!(
            run(&mut state, &shopper(), bad),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(state.product(&p1).unwrap().stock, 5);
        assert_eq!(cart::get(&state, &shopper()).unwrap().len(), 1);
    }

    #[test]
    fn test_checkout_out_of_stock_leaves_state_untouched() {
        let mut state = state_with_admin();
        let p1 = catalog::create(&mut state, &admin(), draft("P1", 100, 5)).unwrap();
        let p2 = catalog::create(&mut state, &admin(), draft("P2", 300, 3)).unwrap();
        cart::add(&mut state, &shopper(), &p1, 2).unwrap();
        cart::add(&mut state, &shopper(), &p2, 3).unwrap();

        // Another shopper drains P2 between cart-build and checkout.
        let rival = Caller::user("shopper-2");
        cart::add(&mut state, &rival, &p2, 2).unwrap();
        run(&mut state, &rival, shipping()).unwrap();

        let err = run(&mut state, &shopper(), shipping()).unwrap_err();
        assert_eq!(
            err,
            DomainError::OutOfStock {
                product_id: p2.clone(),
                requested: 3,
                available: 1,
            }
        );
        // No partial decrement: P1 untouched even though it validated first.
        assert_eq!(state.product(&p1).unwrap().stock, 5);
        assert_eq!(state.product(&p2).unwrap().stock, 1);
        assert_eq!(cart::get(&state, &shopper()).unwrap().len(), 2);
    }

    #[test]
    fn test_checkout_prices_at_current_catalog_price() {
        let mut state = state_with_admin();
        let p1 = catalog::create(&mut state, &admin(), draft("P1", 100, 5)).unwrap();
        cart::add(&mut state, &shopper(), &p1, 2).unwrap();

        // Price rises after the item went into the cart.
        catalog::update(&mut state, &admin(), &p1, draft("P1", 150, 5)).unwrap();

        let order_id = run(&mut state, &shopper(), shipping()).unwrap();
        let order = state.orders.iter().find(|o| o.id == order_id).unwrap();
        assert_eq!(order.total, Price::from_minor_units(300));
    }

    #[test]
    fn test_order_snapshot_survives_product_mutation() {
        let mut state = state_with_admin();
        let p1 = catalog::create(&mut state, &admin(), draft("P1", 100, 5)).unwrap();
        cart::add(&mut state, &shopper(), &p1, 1).unwrap();
        let order_id = run(&mut state, &shopper(), shipping()).unwrap();

        catalog::update(&mut state, &admin(), &p1, draft("Renamed", 999, 5)).unwrap();
        catalog::delete(&mut state, &admin(), &p1).unwrap();

        let order = state.orders.iter().find(|o| o.id == order_id).unwrap();
        let item = order.items.first().unwrap();
        assert_eq!(item.name, "P1");
        assert_eq!(item.price, Price::from_minor_units(100));
        assert_eq!(order.total, Price::from_minor_units(100));
    }

    #[test]
    fn test_checkout_with_deleted_cart_product_is_empty_cart() {
        // delete_product strips carts, so the cart is simply empty again.
        let mut state = state_with_admin();
        let p1 = catalog::create(&mut state, &admin(), draft("P1", 100, 5)).unwrap();
        cart::add(&mut state, &shopper(), &p1, 1).unwrap();
        catalog::delete(&mut state, &admin(), &p1).unwrap();

        assert_eq!(
            run(&mut state, &shopper(), shipping()).unwrap_err(),
            DomainError::EmptyCart,
        );
    }

    #[test]
    fn test_double_checkout_second_sees_empty_cart() {
        let mut state = state_with_admin();
        let p1 = catalog::create(&mut state, &admin(), draft("P1", 100, 5)).unwrap();
        cart::add(&mut state, &shopper(), &p1, 1).unwrap();

        run(&mut state, &shopper(), shipping()).unwrap();
        assert_eq!(
            run(&mut state, &shopper(), shipping()).unwrap_err(),
            DomainError::EmptyCart,
        );
        assert_eq!(state.orders.len(), 1);
    }

    #[test]
    fn test_multi_line_totals() {
        let mut state = state_with_admin();
        let p1 = catalog::create(&mut state, &admin(), draft("P1", 250, 10)).unwrap();
        let p2 = catalog::create(&mut state, &admin(), draft("P2", 1000, 10)).unwrap();
        cart::add(&mut state, &shopper(), &p1, 4).unwrap();
        cart::add(&mut state, &shopper(), &p2, 1).unwrap();

        let order_id = run(&mut state, &shopper(), shipping()).unwrap();
        let order = state.orders.iter().find(|o| o.id == order_id).unwrap();
        assert_eq!(order.total, Price::from_minor_units(2000));
        assert_eq!(state.product(&p1).unwrap().stock, 6);
        assert_eq!(state.product(&p2).unwrap().stock, 9);
    }
}
