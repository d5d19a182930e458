//! Order lifecycle operations.
//!
//! Status reassignment is deliberately unguarded: an administrator may set
//! any status regardless of the current one. The lifecycle order of the enum
//! is documentation, not an enforced state machine.

use tamarind_core::{DomainError, DomainResult, Order, OrderId, OrderStatus};

use super::MarketState;
use crate::gateway::Caller;

/// Fetch an order, visible to its owner or an administrator.
pub(super) fn get(state: &MarketState, caller: &Caller, id: &OrderId) -> DomainResult<Order> {
    let order = find(state, id)?;
    let is_owner = caller.user_id() == Some(&order.user);
    if is_owner || state.role_of(caller).is_admin() {
        Ok(order.clone())
    } else {
        Err(DomainError::Unauthorized(
            "order belongs to another user".to_string(),
        ))
    }
}

/// The caller's own orders, most recent first.
pub(super) fn list_for_caller(state: &MarketState, caller: &Caller) -> DomainResult<Vec<Order>> {
    let user = state.require_user(caller)?;
    Ok(state
        .orders
        .iter()
        .rev()
        .filter(|order| order.user == *user)
        .cloned()
        .collect())
}

/// Every order, most recent first. Administrator-only.
pub(super) fn list_all(state: &MarketState, caller: &Caller) -> DomainResult<Vec<Order>> {
    state.require_admin(caller)?;
    Ok(state.orders.iter().rev().cloned().collect())
}

/// Orders with the given status, most recent first. Administrator-only.
pub(super) fn list_by_status(
    state: &MarketState,
    caller: &Caller,
    status: OrderStatus,
) -> DomainResult<Vec<Order>> {
    state.require_admin(caller)?;
    Ok(state
        .orders
        .iter()
        .rev()
        .filter(|order| order.status == status)
        .cloned()
        .collect())
}

/// Overwrite an order's status. Idempotent; no transition validation.
pub(super) fn update_status(
    state: &mut MarketState,
    caller: &Caller,
    id: &OrderId,
    status: OrderStatus,
) -> DomainResult<()> {
    state.require_admin(caller)?;
    let order = state
        .orders
        .iter_mut()
        .find(|order| order.id == *id)
        .ok_or_else(|| DomainError::order_not_found(id))?;

    if order.status != status {
        tracing::info!(order_id = %id, from = %order.status, to = %status, "order status updated");
        order.status = status;
    }
    Ok(())
}

fn find<'a>(state: &'a MarketState, id: &OrderId) -> DomainResult<&'a Order> {
    state
        .orders
        .iter()
        .find(|order| order.id == *id)
        .ok_or_else(|| DomainError::order_not_found(id))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tamarind_core::ShippingDetails;

    use super::*;
    use crate::memory::tests::{admin, draft, shopper, state_with_admin};
    use crate::memory::{cart, catalog, checkout};

    fn shipping() -> ShippingDetails {
        ShippingDetails {
            name: "Ada Osei".to_string(),
            phone: "+233200000001".to_string(),
            address: "4 Harbor Lane".to_string(),
            city: "Tema".to_string(),
        }
    }

    fn place_order(state: &mut MarketState, who: &Caller) -> OrderId {
        let id = catalog::create(state, &admin(), draft("Lamp", 100, 100)).unwrap();
        cart::add(state, who, &id, 1).unwrap();
        checkout::run(state, who, shipping()).unwrap()
    }

    #[test]
    fn test_get_order_visibility() {
        let mut state = state_with_admin();
        let order_id = place_order(&mut state, &shopper());

        assert!(get(&state, &shopper(), &order_id).is_ok());
        assert!(get(&state, &admin(), &order_id).is_ok());
        assert!(matches!(
            get(&state, &Caller::user("stranger"), &order_id),
            Err(DomainError::Unauthorized(_))
        ));
        assert!(matches!(
            get(&state, &Caller::Guest, &order_id),
            Err(DomainError::Unauthorized(_))
        ));
        assert!(matches!(
            get(&state, &shopper(), &OrderId::new("missing")),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_listings_are_most_recent_first() {
        let mut state = state_with_admin();
        let first = place_order(&mut state, &shopper());
        let second = place_order(&mut state, &shopper());

        let mine = list_for_caller(&state, &shopper()).unwrap();
        let ids: Vec<_> = mine.iter().map(|order| order.id.clone()).collect();
        assert_eq!(ids, vec![second.clone(), first.clone()]);

        let all = list_all(&state, &admin()).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all.first().unwrap().id, second);
    }

    #[test]
    fn test_admin_listings_require_admin() {
        let state = state_with_admin();
        assert!(matches!(
            list_all(&state, &shopper()),
            Err(DomainError::Unauthorized(_))
        ));
        assert!(matches!(
            list_by_status(&state, &shopper(), OrderStatus::Pending),
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_list_by_status_filters() {
        let mut state = state_with_admin();
        let first = place_order(&mut state, &shopper());
        let second = place_order(&mut state, &shopper());
        update_status(&mut state, &admin(), &first, OrderStatus::Shipped).unwrap();

        let pending = list_by_status(&state, &admin(), OrderStatus::Pending).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending.first().unwrap().id, second);

        let shipped = list_by_status(&state, &admin(), OrderStatus::Shipped).unwrap();
        assert_eq!(shipped.len(), 1);
        assert_eq!(shipped.first().unwrap().id, first);
    }

    #[test]
    fn test_update_status_is_admin_only() {
        let mut state = state_with_admin();
        let order_id = place_order(&mut state, &shopper());
        assert!(matches!(
            update_status(&mut state, &shopper(), &order_id, OrderStatus::Shipped),
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_update_status_skips_transitions_freely() {
        let mut state = state_with_admin();
        let order_id = place_order(&mut state, &shopper());

        // pending -> shipped without passing through processing.
        update_status(&mut state, &admin(), &order_id, OrderStatus::Shipped).unwrap();
        assert_eq!(
            get(&state, &admin(), &order_id).unwrap().status,
            OrderStatus::Shipped
        );

        // Walking backwards is allowed too.
        update_status(&mut state, &admin(), &order_id, OrderStatus::Pending).unwrap();
        assert_eq!(
            get(&state, &admin(), &order_id).unwrap().status,
            OrderStatus::Pending
        );
    }

    #[test]
    fn test_update_status_is_idempotent() {
        let mut state = state_with_admin();
        let order_id = place_order(&mut state, &shopper());

        update_status(&mut state, &admin(), &order_id, OrderStatus::Processing).unwrap();
        let after_first = get(&state, &admin(), &order_id).unwrap();
        update_status(&mut state, &admin(), &order_id, OrderStatus::Processing).unwrap();
        let after_second = get(&state, &admin(), &order_id).unwrap();
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn test_update_status_unknown_order() {
        let mut state = state_with_admin();
        assert!(matches!(
            update_status(
                &mut state,
                &admin(),
                &OrderId::new("missing"),
                OrderStatus::Shipped
            ),
            Err(DomainError::NotFound(_))
        ));
    }
}
