//! Caller profiles and role assignment.

use tamarind_core::{DomainResult, UserId, UserProfile, UserRole};

use super::MarketState;
use crate::gateway::Caller;

pub(super) fn profile(state: &MarketState, caller: &Caller) -> DomainResult<Option<UserProfile>> {
    let user = state.require_user(caller)?;
    Ok(state.profiles.get(user).cloned())
}

pub(super) fn save_profile(
    state: &mut MarketState,
    caller: &Caller,
    profile: UserProfile,
) -> DomainResult<()> {
    let user = state.require_user(caller)?.clone();
    profile.validate()?;
    state.profiles.insert(user, profile);
    Ok(())
}

pub(super) fn assign_role(
    state: &mut MarketState,
    caller: &Caller,
    user: &UserId,
    role: UserRole,
) -> DomainResult<()> {
    state.require_admin(caller)?;
    tracing::info!(user = %user, role = %role, "role assigned");
    state.roles.insert(user.clone(), role);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tamarind_core::DomainError;

    use super::*;
    use crate::memory::tests::{admin, shopper, state_with_admin};

    fn profile_fixture() -> UserProfile {
        UserProfile {
            name: "Malik Reyes".to_string(),
            phone: "+15550109".to_string(),
            address: "88 Cedar Way".to_string(),
            city: "Marrakesh".to_string(),
        }
    }

    #[test]
    fn test_profile_roundtrip() {
        let mut state = state_with_admin();
        assert_eq!(profile(&state, &shopper()).unwrap(), None);

        save_profile(&mut state, &shopper(), profile_fixture()).unwrap();
        assert_eq!(
            profile(&state, &shopper()).unwrap(),
            Some(profile_fixture())
        );
    }

    #[test]
    fn test_save_profile_validates_fields() {
        let mut state = state_with_admin();
        let incomplete = UserProfile {
            city: String::new(),
            ..profile_fixture()
        };
        assert!(matches!(
            save_profile(&mut state, &shopper(), incomplete),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(profile(&state, &shopper()).unwrap(), None);
    }

    #[test]
    fn test_guest_has_no_profile_access() {
        let state = state_with_admin();
        assert!(matches!(
            profile(&state, &Caller::Guest),
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_role_resolution_and_assignment() {
        let mut state = state_with_admin();
        assert_eq!(state.role_of(&Caller::Guest), UserRole::Guest);
        assert_eq!(state.role_of(&shopper()), UserRole::User);
        assert_eq!(state.role_of(&admin()), UserRole::Admin);

        let promoted = UserId::new("shopper-1");
        assign_role(&mut state, &admin(), &promoted, UserRole::Admin).unwrap();
        assert_eq!(state.role_of(&shopper()), UserRole::Admin);

        assert!(matches!(
            assign_role(&mut state, &Caller::user("someone"), &promoted, UserRole::User),
            Err(DomainError::Unauthorized(_))
        ));
    }
}
