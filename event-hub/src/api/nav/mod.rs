//! Navigation API Module
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/nav | GET | 当前角色的菜单 + 落地页 | 需要 |
//! | /api/nav/home | GET | 首页跳转决定 | 可选 |
//! | /api/nav/guard?path=&roles= | GET | 路由守卫 (菜单表 / 角色子集) | 可选 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/nav", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::menu))
        .route("/home", get(handler::home))
        .route("/guard", get(handler::guard))
}
