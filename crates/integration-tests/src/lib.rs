//! In-process test harness for the storefront JSON API.
//!
//! Builds the real router over a fresh reference gateway and drives it with
//! `tower::ServiceExt::oneshot`, so tests exercise exactly what a deployed
//! instance serves without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)] // test harness; failures should panic loudly

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use tamarind_backend::MemoryGateway;
use tamarind_core::UserId;
use tamarind_storefront::config::StorefrontConfig;
use tamarind_storefront::routes;
use tamarind_storefront::state::AppState;

/// The identity proxy secret used by every test request.
pub const TEST_SECRET: &str = "k9#mQ2$vX7@pL4&nR8*wD3^zF6!bT1%j";

/// The bootstrap administrator every harness starts with.
pub const ROOT_ADMIN: &str = "root-1";

/// An in-process storefront instance.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// Build a fresh storefront over an empty gateway with [`ROOT_ADMIN`]
    /// bootstrapped. The catalog cache is disabled so stock assertions read
    /// live data.
    #[must_use]
    pub fn new() -> Self {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            identity_secret: SecretString::from(TEST_SECRET),
            admin_users: vec![UserId::new(ROOT_ADMIN)],
            catalog_cache_secs: 0,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_traces_sample_rate: 0.0,
        };
        let gateway = Arc::new(MemoryGateway::with_admins(config.admin_users.clone()));
        let state = AppState::new(config, gateway);
        Self {
            router: routes::app(state),
        }
    }

    /// Clone the underlying router for raw-request tests (e.g., forged
    /// identity headers).
    #[must_use]
    pub fn router_clone(&self) -> Router {
        self.router.clone()
    }

    /// Issue a request, optionally as a signed-in caller, and decode the
    /// JSON response (204s decode to `Value::Null`).
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        caller: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(caller) = caller {
            builder = builder
                .header("x-caller-id", caller)
                .header("x-identity-secret", TEST_SECRET);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    /// Create a product as the root administrator and return its id.
    pub async fn seed_product(&self, name: &str, price: u64, stock: u32) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/api/admin/products",
                Some(ROOT_ADMIN),
                Some(serde_json::json!({
                    "name": name,
                    "description": format!("{name} description"),
                    "price": price,
                    "category": "home",
                    "stock": stock,
                    "image": format!("blob:{name}"),
                    "contact_phone": "+15550100",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "seed failed: {body}");
        body["id"].as_str().unwrap().to_string()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard shipping details body for checkout requests.
#[must_use]
pub fn shipping_body() -> Value {
    serde_json::json!({
        "name": "Ada Osei",
        "phone": "+233200000001",
        "address": "4 Harbor Lane",
        "city": "Tema",
    })
}
