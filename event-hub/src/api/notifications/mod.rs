//! Guest Notification API Module
//!
//! 客人端 (无需员工登录):
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/guests/{guest_id}/notifications | GET | 拉取列表 + 未读数 |
//! | /api/guests/{guest_id}/notifications/{id}/read | POST | 标记单条已读 |
//! | /api/guests/{guest_id}/notifications/read-all | POST | 当前列表全部已读 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/guests/{guest_id}/notifications", get(handler::list))
        .route(
            "/api/guests/{guest_id}/notifications/read-all",
            post(handler::mark_all),
        )
        .route(
            "/api/guests/{guest_id}/notifications/{id}/read",
            post(handler::mark_one),
        )
}
