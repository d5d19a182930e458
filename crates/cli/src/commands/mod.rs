//! Command implementations and the shared HTTP client.

pub mod orders;
pub mod products;
pub mod seed;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The storefront rejected the request.
    #[error("storefront rejected the request ({code}): {message}")]
    Rejected { code: String, message: String },

    /// Local configuration problem.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Error body returned by the storefront API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    error: String,
}

/// HTTP client carrying the caller identity headers.
pub struct Client {
    http: reqwest::Client,
    endpoint: String,
    caller: Option<String>,
    secret: Option<String>,
}

impl Client {
    /// Build a client, reading the identity proxy secret from
    /// `TAMARIND_IDENTITY_SECRET` (a `.env` file is honored).
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if a caller is given without a secret to
    /// authenticate the assertion.
    pub fn from_env(endpoint: String, caller: Option<String>) -> Result<Self, CliError> {
        let _ = dotenvy::dotenv();
        let secret = std::env::var("TAMARIND_IDENTITY_SECRET").ok();

        if caller.is_some() && secret.is_none() {
            return Err(CliError::Config(
                "TAMARIND_IDENTITY_SECRET must be set to assert a caller identity".to_string(),
            ));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            caller,
            secret,
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, format!("{}{path}", self.endpoint));
        if let (Some(caller), Some(secret)) = (&self.caller, &self.secret) {
            builder = builder
                .header("x-caller-id", caller)
                .header("x-identity-secret", secret);
        }
        builder
    }

    /// Send a request and decode the JSON response, mapping API rejections
    /// to [`CliError::Rejected`].
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<Value, CliError> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            if status == reqwest::StatusCode::NO_CONTENT {
                return Ok(Value::Null);
            }
            return Ok(response.json().await?);
        }

        let body = response
            .json::<ErrorBody>()
            .await
            .unwrap_or_else(|_| ErrorBody {
                code: "unknown".to_string(),
                error: format!("HTTP {status}"),
            });
        Err(CliError::Rejected {
            code: body.code,
            message: body.error,
        })
    }

    pub(crate) async fn get(&self, path: &str) -> Result<Value, CliError> {
        self.send(self.request(reqwest::Method::GET, path)).await
    }

    pub(crate) async fn post(&self, path: &str, body: &Value) -> Result<Value, CliError> {
        self.send(self.request(reqwest::Method::POST, path).json(body))
            .await
    }

    pub(crate) async fn put(&self, path: &str, body: &Value) -> Result<Value, CliError> {
        self.send(self.request(reqwest::Method::PUT, path).json(body))
            .await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Value, CliError> {
        self.send(self.request(reqwest::Method::DELETE, path)).await
    }
}

/// Assign a role to a user.
pub async fn assign_role(client: &Client, user: &str, role: &str) -> Result<(), CliError> {
    client
        .put(
            &format!("/api/admin/users/{user}/role"),
            &serde_json::json!({ "role": role }),
        )
        .await?;
    tracing::info!("assigned role {role} to {user}");
    Ok(())
}
