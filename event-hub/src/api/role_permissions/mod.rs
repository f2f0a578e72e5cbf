//! Role Permission API Module
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/role-permissions | GET | 各角色生效权限 | 需要 |
//! | /api/role-permissions/refresh | POST | 从后端重新加载 | 需要 |
//! | /api/role-permissions/{role} | PUT | 开关单个菜单项 | Admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::api::middleware::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/api/role-permissions", get(handler::list))
        .route("/api/role-permissions/refresh", post(handler::refresh));

    let write_routes = Router::new()
        .route("/api/role-permissions/{role}", put(handler::toggle))
        .layer(middleware::from_fn(require_admin));

    read_routes.merge(write_routes)
}
