//! Navigation API Handlers

use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use shared::error::AppResult;
use shared::models::{NavLink, Role};
use shared::{AppError, ApiResponse};

use crate::access::{GuardDecision, HomeRedirect, PermissionSource};
use crate::api::profile::{CurrentProfile, MaybeProfile};
use crate::core::ServerState;

#[derive(Debug, Serialize)]
pub struct NavResponse {
    pub items: Vec<NavLink>,
    /// First reachable destination; `null` when the menu is empty
    pub landing: Option<String>,
    pub source: PermissionSource,
}

/// GET /api/nav - menu of the current profile
pub async fn menu(
    State(state): State<ServerState>,
    CurrentProfile(profile): CurrentProfile,
) -> AppResult<ApiResponse<NavResponse>> {
    let resolved = state.access.resolve(profile.role);
    tracing::debug!(
        profile_id = %profile.id,
        role = %profile.role,
        source = ?resolved.source,
        "Resolving menu"
    );

    Ok(ApiResponse::success(NavResponse {
        items: state.access.menu(profile.role),
        landing: state.access.landing(profile.role),
        source: resolved.source,
    }))
}

/// GET /api/nav/home - where the home route should go
pub async fn home(
    State(state): State<ServerState>,
    profile: MaybeProfile,
) -> AppResult<ApiResponse<HomeRedirect>> {
    let decision = match profile.profile() {
        Some(profile) => state.access.home(profile.role),
        None => HomeRedirect::Pending,
    };
    Ok(ApiResponse::success(decision))
}

#[derive(Debug, Deserialize)]
pub struct GuardQuery {
    pub path: Option<String>,
    /// Comma-separated role subset of a role-gated route
    pub roles: Option<String>,
}

fn parse_roles(raw: &str) -> AppResult<Vec<Role>> {
    raw.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(|r| r.parse::<Role>().map_err(AppError::from))
        .collect()
}

#[derive(Debug, Serialize)]
pub struct GuardResponse {
    pub allowed: bool,
    pub redirect: Option<&'static str>,
}

impl From<GuardDecision> for GuardResponse {
    fn from(decision: GuardDecision) -> Self {
        Self {
            allowed: decision.is_allowed(),
            redirect: decision.redirect(),
        }
    }
}

/// GET /api/nav/guard?path=&roles= - route guard decision
///
/// `path` checks the nav table, `roles` an explicit role subset. With both,
/// the navigation must pass both checks.
pub async fn guard(
    State(state): State<ServerState>,
    profile: MaybeProfile,
    Query(query): Query<GuardQuery>,
) -> AppResult<ApiResponse<GuardResponse>> {
    let path = query.path.filter(|p| !p.trim().is_empty());
    let roles = query
        .roles
        .filter(|r| !r.trim().is_empty())
        .map(|r| parse_roles(&r))
        .transpose()?;

    let profile = profile.profile();
    let decision = match (path.as_deref(), roles.as_deref()) {
        (None, None) => return Err(AppError::validation("path or roles is required")),
        (Some(path), None) => state.access.guard(profile, path),
        (None, Some(roles)) => state.access.guard_roles(profile, roles),
        (Some(path), Some(roles)) => match state.access.guard_roles(profile, roles) {
            GuardDecision::Allow => state.access.guard(profile, path),
            denied => denied,
        },
    };
    Ok(ApiResponse::success(decision.into()))
}
