//! Account route handlers: role lookup and profile capture.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use tamarind_core::{UserProfile, UserRole};

use crate::error::Result;
use crate::middleware::Identity;
use crate::state::AppState;

/// Role lookup response.
#[derive(Debug, Serialize)]
pub struct RoleView {
    pub role: UserRole,
}

/// Profile lookup response; `profile` is null until first saved.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub profile: Option<UserProfile>,
}

/// The caller's resolved role.
#[instrument(skip(state, caller))]
pub async fn role(
    State(state): State<AppState>,
    Identity(caller): Identity,
) -> Result<Json<RoleView>> {
    let role = state.gateway().caller_role(&caller).await?;
    Ok(Json(RoleView { role }))
}

/// The caller's saved profile, if any.
#[instrument(skip(state, caller))]
pub async fn profile(
    State(state): State<AppState>,
    Identity(caller): Identity,
) -> Result<Json<ProfileView>> {
    let profile = state.gateway().caller_profile(&caller).await?;
    Ok(Json(ProfileView { profile }))
}

/// Save or replace the caller's profile.
#[instrument(skip(state, caller, profile))]
pub async fn save_profile(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Json(profile): Json<UserProfile>,
) -> Result<Json<ProfileView>> {
    state
        .gateway()
        .save_caller_profile(&caller, profile.clone())
        .await?;
    Ok(Json(ProfileView {
        profile: Some(profile),
    }))
}
