//! Role Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::AppError;

/// User role (closed set)
///
/// Serialized with the labels stored in the backend `profiles.role` and
/// `role_permissions.role` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Admin")]
    Admin,
    #[serde(rename = "Quản lý")]
    Manager,
    #[serde(rename = "Nhân viên")]
    Staff,
    #[serde(rename = "Sale")]
    Sale,
    #[serde(rename = "QL ekip")]
    CrewLead,
}

impl Role {
    /// Every role, in display order
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Manager,
        Role::Staff,
        Role::Sale,
        Role::CrewLead,
    ];

    /// Stored label
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Quản lý",
            Role::Staff => "Nhân viên",
            Role::Sale => "Sale",
            Role::CrewLead => "QL ekip",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role label outside the known set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct InvalidRole(pub String);

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == trimmed)
            .ok_or_else(|| InvalidRole(s.to_string()))
    }
}

impl From<InvalidRole> for AppError {
    fn from(err: InvalidRole) -> Self {
        AppError::invalid_role(err.0)
    }
}

/// Permission record for one role (`role_permissions` row)
///
/// `permissions` holds nav item ids. The whole set is written on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermissionRecord {
    pub role: Role,
    pub permissions: BTreeSet<String>,
}

impl RolePermissionRecord {
    pub fn new(role: Role, permissions: impl IntoIterator<Item = String>) -> Self {
        Self {
            role,
            permissions: permissions.into_iter().collect(),
        }
    }
}

/// Unvalidated `role_permissions` row as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePermissionRow {
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl TryFrom<RolePermissionRow> for RolePermissionRecord {
    type Error = InvalidRole;

    fn try_from(row: RolePermissionRow) -> Result<Self, Self::Error> {
        let role = row.role.parse()?;
        Ok(Self::new(role, row.permissions))
    }
}

impl From<&RolePermissionRecord> for RolePermissionRow {
    fn from(record: &RolePermissionRecord) -> Self {
        Self {
            role: record.role.as_str().to_string(),
            permissions: record.permissions.iter().cloned().collect(),
        }
    }
}

/// Toggle payload sent by the permission settings screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionToggle {
    pub nav_id: String,
    pub enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_labels_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(serde_json::from_str::<Role>(&json).unwrap(), role);
        }
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"Quản lý\"");
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert_eq!("Guest".parse::<Role>(), Err(InvalidRole("Guest".into())));
        assert!("admin".parse::<Role>().is_err());
        assert!(serde_json::from_str::<Role>("\"Khách\"").is_err());
    }

    #[test]
    fn test_row_conversion_validates_role() {
        let row = RolePermissionRow {
            role: "Sale".into(),
            permissions: vec!["revenue".into(), "dashboard".into(), "revenue".into()],
        };
        let record = RolePermissionRecord::try_from(row).unwrap();
        assert_eq!(record.role, Role::Sale);
        assert_eq!(record.permissions.len(), 2);

        let bad = RolePermissionRow {
            role: "Intern".into(),
            permissions: vec![],
        };
        assert!(RolePermissionRecord::try_from(bad).is_err());
    }

    #[test]
    fn test_row_missing_permissions_defaults_empty() {
        let row: RolePermissionRow = serde_json::from_str(r#"{"role":"Admin"}"#).unwrap();
        assert!(row.permissions.is_empty());
    }
}
