//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`nav`] - 菜单、首页跳转、路由守卫
//! - [`role_permissions`] - 角色权限查看与开关
//! - [`notifications`] - 客人通知与已读状态
//!
//! 所有响应都使用 [`shared::ApiResponse`] 包装。

pub mod health;
pub mod middleware;
pub mod nav;
pub mod notifications;
pub mod profile;
pub mod role_permissions;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub use profile::{CurrentProfile, MaybeProfile, PROFILE_ID_HEADER, PROFILE_ROLE_HEADER};

/// All routes, without middleware or state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(nav::router())
        .merge(role_permissions::router())
        .merge(notifications::router())
}

/// Fully configured application, used by the server and by tests
pub fn build_app(state: ServerState) -> Router {
    build_router()
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
