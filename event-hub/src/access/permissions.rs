//! Permission resolution
//!
//! Effective permissions of a role come from one of two places:
//! - **Static**: ids of nav items whose role list permits the role
//! - **Backend**: the role's `role_permissions` record, when one exists
//!
//! A backend record replaces the static set wholesale; there is no per-id merge.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use shared::error::AppResult;
use shared::models::{Role, RolePermissionRecord};
use shared::AppError;

use super::nav_table::NavTable;

/// Where a resolved permission set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionSource {
    Static,
    Backend,
}

/// Effective permission set of one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPermissions {
    pub role: Role,
    pub source: PermissionSource,
    pub permissions: BTreeSet<String>,
}

impl ResolvedPermissions {
    pub fn contains(&self, nav_id: &str) -> bool {
        self.permissions.contains(nav_id)
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

/// Resolve a role against the nav table and an optional backend record
///
/// A record for a different role is ignored.
pub fn merge_permissions(
    role: Role,
    nav: &NavTable,
    record: Option<&RolePermissionRecord>,
) -> ResolvedPermissions {
    match record.filter(|r| r.role == role) {
        Some(record) => ResolvedPermissions {
            role,
            source: PermissionSource::Backend,
            permissions: record.permissions.clone(),
        },
        None => ResolvedPermissions {
            role,
            source: PermissionSource::Static,
            permissions: nav.static_permissions(role).map(str::to_string).collect(),
        },
    }
}

/// Every id must name a nav item
pub fn validate_permissions(
    nav: &NavTable,
    ids: impl IntoIterator<Item = impl AsRef<str>>,
) -> AppResult<()> {
    for id in ids {
        let id = id.as_ref();
        if !nav.contains(id) {
            return Err(AppError::nav_item_not_found(id));
        }
    }
    Ok(())
}

/// Complete record for a role after switching one id on or off
pub fn toggle_permission(
    current: &ResolvedPermissions,
    nav_id: &str,
    enabled: bool,
) -> RolePermissionRecord {
    let mut permissions = current.permissions.clone();
    if enabled {
        permissions.insert(nav_id.to_string());
    } else {
        permissions.remove(nav_id);
    }
    RolePermissionRecord {
        role: current.role,
        permissions,
    }
}
