//! Menu resolution and route gating
//!
//! Pure functions over an ordered nav item slice. Anything that can answer
//! "may this item be used" ([`Grants`]) drives them: a bare [`Role`] uses the
//! static role lists, a [`ResolvedPermissions`] also honours backend overrides.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shared::models::{NavItem, Role};

use super::permissions::ResolvedPermissions;

/// Decides whether a nav item is usable
pub trait Grants {
    fn grants(&self, item: &NavItem) -> bool;
}

impl Grants for Role {
    fn grants(&self, item: &NavItem) -> bool {
        item.permits(*self)
    }
}

impl Grants for ResolvedPermissions {
    fn grants(&self, item: &NavItem) -> bool {
        item.allowed_roles.is_unrestricted() || self.contains(&item.id)
    }
}

/// What to do with a path no nav item matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedRoutePolicy {
    /// Let it through (current product behaviour)
    #[default]
    Allow,
    Deny,
}

impl FromStr for UnmatchedRoutePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "deny" => Ok(Self::Deny),
            other => Err(format!("unknown unmatched route policy: {}", other)),
        }
    }
}

/// Items the grantee may use, in table order
pub fn resolve_menu<'a, G: Grants + ?Sized>(grantee: &G, nav_items: &'a [NavItem]) -> Vec<&'a NavItem> {
    nav_items.iter().filter(|item| grantee.grants(item)).collect()
}

/// Destination of the first usable item; `None` when nothing is usable
pub fn default_landing_route<'a, G: Grants + ?Sized>(
    grantee: &G,
    nav_items: &'a [NavItem],
) -> Option<&'a str> {
    nav_items
        .iter()
        .find(|item| grantee.grants(item))
        .map(|item| item.destination.as_str())
}

/// Route gate with the default (allow) policy for unmatched paths
pub fn is_route_allowed<G: Grants + ?Sized>(grantee: &G, path: &str, nav_items: &[NavItem]) -> bool {
    is_route_allowed_with(grantee, path, nav_items, UnmatchedRoutePolicy::Allow)
}

/// Route gate: allowed iff some matching item is usable
pub fn is_route_allowed_with<G: Grants + ?Sized>(
    grantee: &G,
    path: &str,
    nav_items: &[NavItem],
    policy: UnmatchedRoutePolicy,
) -> bool {
    let mut matched = false;
    for item in nav_items.iter().filter(|item| item.matches_path(path)) {
        if grantee.grants(item) {
            return true;
        }
        matched = true;
    }

    !matched && policy == UnmatchedRoutePolicy::Allow
}
