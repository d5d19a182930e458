//! Product category enumeration.

use serde::{Deserialize, Serialize};

/// The fixed set of catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Electronics,
    Clothing,
    Home,
    Books,
    Sports,
}

impl ProductCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 5] = [
        Self::Electronics,
        Self::Clothing,
        Self::Home,
        Self::Books,
        Self::Sports,
    ];
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Electronics => write!(f, "electronics"),
            Self::Clothing => write!(f, "clothing"),
            Self::Home => write!(f, "home"),
            Self::Books => write!(f, "books"),
            Self::Sports => write!(f, "sports"),
        }
    }
}

impl std::str::FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "electronics" => Ok(Self::Electronics),
            "clothing" => Ok(Self::Clothing),
            "home" => Ok(Self::Home),
            "books" => Ok(Self::Books),
            "sports" => Ok(Self::Sports),
            _ => Err(format!("invalid product category: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display_from_str_roundtrip() {
        for category in ProductCategory::ALL {
            let parsed = ProductCategory::from_str(&category.to_string()).unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!(ProductCategory::from_str("garden").is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&ProductCategory::Electronics).unwrap();
        assert_eq!(json, "\"electronics\"");
    }
}
