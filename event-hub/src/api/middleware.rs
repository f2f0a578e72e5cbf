//! 授权中间件

use axum::{extract::Request, middleware::Next, response::Response};
use shared::AppError;

use crate::api::profile::profile_from_headers;
use crate::security_log;

/// 管理员检查中间件 - 要求 Admin 角色
///
/// 无 profile 返回 401，非 Admin 返回 403 (AdminRequired)。
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let profile = profile_from_headers(req.headers())?.ok_or_else(|| {
        security_log!("WARN", "profile_missing", uri = format!("{:?}", req.uri()));
        AppError::not_authenticated()
    })?;

    if !profile.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            profile_id = profile.id.clone(),
            role = profile.role.as_str(),
            uri = format!("{:?}", req.uri())
        );
        return Err(AppError::admin_required());
    }

    Ok(next.run(req).await)
}
