//! Navigation Model
//!
//! Static menu/route table entries and the link shape handed to the UI shell.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::role::Role;

/// Which roles may see and open a nav item
///
/// Wire form: `null` (or absent) for unrestricted, otherwise a JSON array of
/// role labels.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<Vec<Role>>", into = "Option<Vec<Role>>")]
pub enum RoleRule {
    #[default]
    Unrestricted,
    Only(BTreeSet<Role>),
}

impl RoleRule {
    pub fn only(roles: impl IntoIterator<Item = Role>) -> Self {
        Self::Only(roles.into_iter().collect())
    }

    pub fn permits(&self, role: Role) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Only(roles) => roles.contains(&role),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }
}

impl From<Option<Vec<Role>>> for RoleRule {
    fn from(value: Option<Vec<Role>>) -> Self {
        match value {
            None => Self::Unrestricted,
            Some(roles) => Self::only(roles),
        }
    }
}

impl From<RoleRule> for Option<Vec<Role>> {
    fn from(rule: RoleRule) -> Self {
        match rule {
            RoleRule::Unrestricted => None,
            RoleRule::Only(roles) => Some(roles.into_iter().collect()),
        }
    }
}

/// One entry of the menu/route table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    /// Identifier stored in role permission sets
    pub id: String,
    /// Route path, e.g. `/guests`
    pub destination: String,
    pub label: String,
    /// Icon reference understood by the UI shell
    pub icon: String,
    #[serde(default)]
    pub allowed_roles: RoleRule,
    #[serde(default)]
    pub is_secondary: bool,
    /// Exact-match only (`true`) or also match sub-paths (`false`)
    #[serde(default)]
    pub end: bool,
}

impl NavItem {
    pub fn new(
        id: impl Into<String>,
        destination: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
        allowed_roles: RoleRule,
    ) -> Self {
        Self {
            id: id.into(),
            destination: destination.into(),
            label: label.into(),
            icon: icon.into(),
            allowed_roles,
            is_secondary: false,
            end: false,
        }
    }

    pub fn secondary(mut self) -> Self {
        self.is_secondary = true;
        self
    }

    pub fn exact(mut self) -> Self {
        self.end = true;
        self
    }

    pub fn permits(&self, role: Role) -> bool {
        self.allowed_roles.permits(role)
    }

    /// Whether `path` is handled by this item's destination
    ///
    /// Query string and fragment are ignored, trailing slashes are not
    /// significant. Prefix matches only happen on segment boundaries.
    pub fn matches_path(&self, path: &str) -> bool {
        let dest = normalize_path(&self.destination);
        let path = normalize_path(path);

        if dest == path {
            return true;
        }
        if self.end {
            return false;
        }
        if dest == "/" {
            return true;
        }
        path.strip_prefix(dest)
            .is_some_and(|rest| rest.starts_with('/'))
    }

    pub fn to_link(&self) -> NavLink {
        NavLink::from(self)
    }
}

fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Render contract handed to the UI shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub destination: String,
    pub label: String,
    pub icon: String,
    pub is_secondary: bool,
}

impl From<&NavItem> for NavLink {
    fn from(item: &NavItem) -> Self {
        Self {
            destination: item.destination.clone(),
            label: item.label.clone(),
            icon: item.icon.clone(),
            is_secondary: item.is_secondary,
        }
    }
}
