//! Route guards
//!
//! Decisions the UI shell applies on navigation:
//! - role-gated routes redirect to `/` for both "not logged in" and "wrong role"
//! - the home route waits until permissions are known and the resolved menu
//!   has a first entry

use serde::{Deserialize, Serialize};
use shared::models::{NavItem, Profile, Role};

use super::permissions::ResolvedPermissions;
use super::resolver::default_landing_route;

/// Where rejected navigations are sent
pub const ROOT_ROUTE: &str = "/";

/// Outcome of a guarded navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    Allow,
    RedirectToRoot,
}

impl GuardDecision {
    pub fn from_allowed(allowed: bool) -> Self {
        if allowed {
            Self::Allow
        } else {
            Self::RedirectToRoot
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Redirect target, if any
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectToRoot => Some(ROOT_ROUTE),
        }
    }
}

/// Guard for a route restricted to `allowed` roles
pub fn guard_role_route(profile: Option<&Profile>, allowed: &[Role]) -> GuardDecision {
    match profile {
        Some(profile) => GuardDecision::from_allowed(allowed.contains(&profile.role)),
        None => GuardDecision::RedirectToRoot,
    }
}

/// Home route decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HomeRedirect {
    /// Keep showing the neutral/loading state
    Pending,
    Redirect { to: String },
}

/// Redirect to the landing route once permissions are known
///
/// Agrees with [`default_landing_route`]: `Pending` exactly when the resolved
/// menu is empty (or nothing is loaded yet).
pub fn home_redirect(permissions: Option<&ResolvedPermissions>, nav_items: &[NavItem]) -> HomeRedirect {
    let Some(permissions) = permissions else {
        return HomeRedirect::Pending;
    };

    match default_landing_route(permissions, nav_items) {
        Some(to) => HomeRedirect::Redirect { to: to.to_string() },
        None => HomeRedirect::Pending,
    }
}
