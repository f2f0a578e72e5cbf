//! Navigation table
//!
//! The menu/route table is process-wide configuration: built once at start-up
//! (built-in default or a JSON file) and shared read-only behind an `Arc`.
//!
//! ## 默认菜单
//!
//! | id | 路径 | 角色 |
//! |----|------|------|
//! | dashboard | `/` | 全部 |
//! | guests | `/guests` | Admin, Quản lý, Nhân viên, Sale |
//! | revenue | `/vip-revenue` | Admin, Quản lý, Sale |
//! | media | `/media-benefits` | Admin, Quản lý, Nhân viên, QL ekip |
//! | tasks | `/tasks` | Admin, Quản lý, Nhân viên, QL ekip |
//! | notifications | `/notifications` | Admin, Quản lý |
//! | account | `/accounts` | Admin, Quản lý |
//! | settings | `/settings` | Admin |

use std::collections::HashSet;
use std::path::Path;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{NavItem, Role, RoleRule};

/// Ordered, immutable list of nav items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavTable {
    items: Vec<NavItem>,
}

impl NavTable {
    /// Build a table, rejecting duplicate or empty ids
    pub fn new(items: Vec<NavItem>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for item in &items {
            if item.id.trim().is_empty() {
                return Err(AppError::with_message(
                    ErrorCode::NavTableInvalid,
                    format!("Nav item for {} has an empty id", item.destination),
                ));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(AppError::with_message(
                    ErrorCode::NavTableInvalid,
                    format!("Duplicate nav item id: {}", item.id),
                ));
            }
        }
        Ok(Self { items })
    }

    /// Load a JSON array of nav items
    pub fn from_json_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Failed to read nav table {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> AppResult<Self> {
        let items: Vec<NavItem> = serde_json::from_str(content).map_err(|e| {
            AppError::with_message(ErrorCode::NavTableInvalid, format!("Invalid nav table: {}", e))
        })?;
        Self::new(items)
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&NavItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Nav ids a role reaches under the static role lists
    pub fn static_permissions(&self, role: Role) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .filter(move |item| item.permits(role))
            .map(|item| item.id.as_str())
    }
}

impl Default for NavTable {
    fn default() -> Self {
        use Role::*;

        let items = vec![
            NavItem::new("dashboard", "/", "Tổng quan", "layout-dashboard", RoleRule::Unrestricted)
                .exact(),
            NavItem::new(
                "guests",
                "/guests",
                "Khách mời",
                "users",
                RoleRule::only([Admin, Manager, Staff, Sale]),
            ),
            NavItem::new(
                "revenue",
                "/vip-revenue",
                "Doanh thu VIP",
                "badge-dollar-sign",
                RoleRule::only([Admin, Manager, Sale]),
            ),
            NavItem::new(
                "media",
                "/media-benefits",
                "Quyền lợi truyền thông",
                "megaphone",
                RoleRule::only([Admin, Manager, Staff, CrewLead]),
            ),
            NavItem::new(
                "tasks",
                "/tasks",
                "Checklist công việc",
                "list-checks",
                RoleRule::only([Admin, Manager, Staff, CrewLead]),
            ),
            NavItem::new(
                "notifications",
                "/notifications",
                "Thông báo khách mời",
                "bell",
                RoleRule::only([Admin, Manager]),
            ),
            NavItem::new(
                "account",
                "/accounts",
                "Tài khoản",
                "user-cog",
                RoleRule::only([Admin, Manager]),
            )
            .secondary(),
            NavItem::new("settings", "/settings", "Cài đặt", "settings", RoleRule::only([Admin]))
                .secondary(),
        ];

        Self { items }
    }
}
