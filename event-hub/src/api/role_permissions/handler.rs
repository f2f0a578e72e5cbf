//! Role Permission API Handlers

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use shared::ApiResponse;
use shared::error::AppResult;
use shared::models::{NavItem, PermissionToggle, Role};

use crate::access::ResolvedPermissions;
use crate::api::profile::CurrentProfile;
use crate::core::ServerState;

#[derive(Debug, Serialize)]
pub struct RolePermissionsResponse {
    /// Toggleable items, in menu order
    pub nav_items: Vec<NavItem>,
    pub roles: Vec<ResolvedPermissions>,
}

/// GET /api/role-permissions - effective permissions of every role
pub async fn list(
    State(state): State<ServerState>,
    _profile: CurrentProfile,
) -> AppResult<ApiResponse<RolePermissionsResponse>> {
    Ok(ApiResponse::success(RolePermissionsResponse {
        nav_items: state.access.nav().items().to_vec(),
        roles: state.access.resolve_all(),
    }))
}

/// PUT /api/role-permissions/{role} - switch one nav item for a role
pub async fn toggle(
    State(state): State<ServerState>,
    CurrentProfile(actor): CurrentProfile,
    Path(role): Path<String>,
    Json(payload): Json<PermissionToggle>,
) -> AppResult<ApiResponse<ResolvedPermissions>> {
    let role: Role = role.parse()?;

    tracing::info!(
        actor_id = %actor.id,
        role = %role,
        nav_id = %payload.nav_id,
        enabled = payload.enabled,
        "Toggling role permission"
    );

    let resolved = state
        .access
        .toggle(&actor, role, &payload.nav_id, payload.enabled)
        .await?;

    Ok(ApiResponse::success(resolved))
}

/// POST /api/role-permissions/refresh - reload records from the backend
pub async fn refresh(
    State(state): State<ServerState>,
    _profile: CurrentProfile,
) -> AppResult<ApiResponse<Vec<ResolvedPermissions>>> {
    state.access.refresh().await?;
    Ok(ApiResponse::success(state.access.resolve_all()))
}
