//! 角色访问控制
//!
//! # 模块结构
//!
//! - [`nav_table`] - 菜单/路由表 (静态配置)
//! - [`resolver`] - 菜单解析与路由校验 (纯函数)
//! - [`permissions`] - 静态角色列表与后端覆盖的合并
//! - [`guard`] - 路由守卫与首页跳转
//! - [`service`] - [`AccessService`]，持有后端覆盖缓存

pub mod guard;
pub mod nav_table;
pub mod permissions;
pub mod resolver;
pub mod service;

pub use guard::{GuardDecision, HomeRedirect, ROOT_ROUTE, guard_role_route, home_redirect};
pub use nav_table::NavTable;
pub use permissions::{
    PermissionSource, ResolvedPermissions, merge_permissions, toggle_permission,
    validate_permissions,
};
pub use resolver::{
    Grants, UnmatchedRoutePolicy, default_landing_route, is_route_allowed, is_route_allowed_with,
    resolve_menu,
};
pub use service::AccessService;
