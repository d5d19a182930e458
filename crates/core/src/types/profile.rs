//! Shopper profile.

use serde::{Deserialize, Serialize};

use crate::error::DomainResult;
use crate::types::order::require_field;

/// Contact and delivery details a shopper saves once and reuses at checkout.
///
/// Advisory data only: orders capture their own [`crate::ShippingDetails`]
/// and are unaffected by later profile edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
}

impl UserProfile {
    /// Validate that every field is present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Validation`] naming the first missing
    /// field.
    pub fn validate(&self) -> DomainResult<()> {
        require_field("name", &self.name)?;
        require_field("phone", &self.phone)?;
        require_field("address", &self.address)?;
        require_field("city", &self.city)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_validation() {
        let profile = UserProfile {
            name: "Malik Reyes".to_string(),
            phone: "+15550109".to_string(),
            address: "88 Cedar Way".to_string(),
            city: "Marrakesh".to_string(),
        };
        assert!(profile.validate().is_ok());

        let blank = UserProfile {
            phone: String::new(),
            ..profile
        };
        assert!(blank.validate().is_err());
    }
}
