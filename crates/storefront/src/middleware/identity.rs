//! Caller identity extraction.
//!
//! Identity issuance is not this service's job: requests arrive through an
//! identity proxy that verifies the shopper and asserts the result in
//! headers. The proxy authenticates itself with a shared secret; a request
//! asserting an identity without the correct secret is rejected outright.
//!
//! - `x-caller-id`: the verified user id, absent for anonymous callers
//! - `x-identity-secret`: the proxy's shared secret, required whenever
//!   `x-caller-id` is present
//!
//! Roles are *not* carried in headers; the gateway resolves them from its
//! own role assignments.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use secrecy::ExposeSecret;

use tamarind_backend::Caller;

use crate::state::AppState;

const CALLER_HEADER: &str = "x-caller-id";
const SECRET_HEADER: &str = "x-identity-secret";

/// Extractor resolving the request's [`Caller`].
///
/// Requests without identity headers resolve to `Caller::Guest`; the
/// gateway decides what guests may do.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(Identity(caller): Identity) -> impl IntoResponse {
///     format!("hello, {caller:?}")
/// }
/// ```
pub struct Identity(pub Caller);

/// Rejection for a forged or malformed identity assertion.
pub enum IdentityRejection {
    /// `x-caller-id` present but the proxy secret is missing or wrong.
    BadProxySecret,
    /// Header value is not valid UTF-8 or is empty.
    MalformedHeader,
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        let message = match self {
            Self::BadProxySecret => "identity assertion not authenticated",
            Self::MalformedHeader => "malformed identity header",
        };
        (StatusCode::UNAUTHORIZED, message).into_response()
    }
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = IdentityRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(raw_caller) = parts.headers.get(CALLER_HEADER) else {
            return Ok(Self(Caller::Guest));
        };

        let caller_id = raw_caller
            .to_str()
            .ok()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(IdentityRejection::MalformedHeader)?;

        let presented = parts
            .headers
            .get(SECRET_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(IdentityRejection::BadProxySecret)?;

        if !secrets_match(presented, state.config().identity_secret.expose_secret()) {
            return Err(IdentityRejection::BadProxySecret);
        }

        Ok(Self(Caller::user(caller_id)))
    }
}

/// Length-independent comparison to avoid trivially leaking the secret
/// through response timing.
fn secrets_match(presented: &str, expected: &str) -> bool {
    let presented = presented.as_bytes();
    let expected = expected.as_bytes();
    if presented.len() != expected.len() {
        return false;
    }
    presented
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
