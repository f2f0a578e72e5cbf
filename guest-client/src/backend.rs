//! Backend query surface consumed by the event hub

use async_trait::async_trait;
use shared::models::{Notification, RolePermissionRecord, RolePermissionRow};

use crate::ClientResult;

/// Row fetch/upsert operations the hub needs from the hosted backend
///
/// Implemented by [`crate::HttpClient`]; tests substitute in-memory fakes.
#[async_trait]
pub trait Backend: Send + Sync {
    /// All `role_permissions` rows, unvalidated
    async fn fetch_role_permissions(&self) -> ClientResult<Vec<RolePermissionRow>>;

    /// Replace the permission set of one role (upsert on `role`)
    async fn upsert_role_permissions(&self, record: &RolePermissionRecord) -> ClientResult<()>;

    /// Most recent notifications for `guest_id` or the broadcast target, newest first
    async fn fetch_guest_notifications(
        &self,
        guest_id: &str,
        limit: usize,
    ) -> ClientResult<Vec<Notification>>;
}
