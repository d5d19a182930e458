//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use tamarind_backend::Gateway;
use tamarind_core::{DomainResult, Product, ProductCategory};

use crate::config::StorefrontConfig;

/// Key into the catalog display cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CatalogKey {
    All,
    Category(ProductCategory),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to configuration, the
/// gateway, and the catalog display cache.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    gateway: Arc<dyn Gateway>,
    catalog_cache: Cache<CatalogKey, Arc<Vec<Product>>>,
}

impl AppState {
    /// Create a new application state around a gateway.
    #[must_use]
    pub fn new(config: StorefrontConfig, gateway: Arc<dyn Gateway>) -> Self {
        let catalog_cache = Cache::builder()
            .max_capacity(64)
            .time_to_live(Duration::from_secs(config.catalog_cache_secs.max(1)))
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                gateway,
                catalog_cache,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the gateway.
    #[must_use]
    pub fn gateway(&self) -> &dyn Gateway {
        self.inner.gateway.as_ref()
    }

    /// Catalog listing for display, read through the cache.
    ///
    /// Display reads only: stock shown here may lag by up to the cache TTL.
    /// Every mutating operation re-validates against live stock inside the
    /// gateway, so a stale listing can never oversell.
    ///
    /// # Errors
    ///
    /// Propagates the gateway error on a cache miss that fails to load.
    pub async fn catalog_listing(
        &self,
        category: Option<ProductCategory>,
    ) -> DomainResult<Arc<Vec<Product>>> {
        let key = category.map_or(CatalogKey::All, CatalogKey::Category);

        if self.inner.config.catalog_cache_secs == 0 {
            return self.load_listing(category).await.map(Arc::new);
        }

        self.inner
            .catalog_cache
            .try_get_with(key, async {
                debug!(?category, "catalog cache miss");
                self.load_listing(category).await.map(Arc::new)
            })
            .await
            .map_err(|e: Arc<tamarind_core::DomainError>| (*e).clone())
    }

    /// Drop all cached catalog listings.
    ///
    /// Called after any catalog mutation and after checkout (stock changed).
    pub fn invalidate_catalog(&self) {
        self.inner.catalog_cache.invalidate_all();
    }

    async fn load_listing(
        &self,
        category: Option<ProductCategory>,
    ) -> DomainResult<Vec<Product>> {
        match category {
            Some(category) => self.gateway().list_products_by_category(category).await,
            None => self.gateway().list_products().await,
        }
    }
}
