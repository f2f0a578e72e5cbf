//! AccessService - 角色权限服务
//!
//! Holds the nav table, the backend handle and the cached `role_permissions`
//! records. Records are fetched at session start ([`AccessService::load`]) and
//! on demand ([`AccessService::refresh`]).

use std::collections::HashMap;
use std::sync::Arc;

use guest_client::Backend;
use parking_lot::RwLock;
use shared::error::AppResult;
use shared::models::{NavLink, Profile, Role, RolePermissionRecord, RolePermissionRow};

use super::guard::{GuardDecision, HomeRedirect, home_redirect};
use super::nav_table::NavTable;
use super::guard::guard_role_route;
use super::permissions::{
    ResolvedPermissions, merge_permissions, toggle_permission, validate_permissions,
};
use super::resolver::{UnmatchedRoutePolicy, default_landing_route, is_route_allowed_with, resolve_menu};
use crate::security_log;

pub struct AccessService {
    nav: Arc<NavTable>,
    backend: Arc<dyn Backend>,
    policy: UnmatchedRoutePolicy,
    /// `None` until the first load attempt finishes
    overrides: RwLock<Option<HashMap<Role, RolePermissionRecord>>>,
}

impl AccessService {
    pub fn new(nav: Arc<NavTable>, backend: Arc<dyn Backend>, policy: UnmatchedRoutePolicy) -> Self {
        Self {
            nav,
            backend,
            policy,
            overrides: RwLock::new(None),
        }
    }

    pub fn nav(&self) -> &NavTable {
        &self.nav
    }

    pub fn policy(&self) -> UnmatchedRoutePolicy {
        self.policy
    }

    /// Whether a load attempt has completed (successfully or not)
    pub fn is_loaded(&self) -> bool {
        self.overrides.read().is_some()
    }

    /// Session-start load; never fails
    ///
    /// On backend failure the cache is set to "no overrides" so every role
    /// resolves from the static role lists.
    pub async fn load(&self) {
        match self.fetch_records().await {
            Ok(records) => {
                tracing::info!(count = records.len(), "Role permissions loaded");
                *self.overrides.write() = Some(records);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load role permissions, using static role lists");
                *self.overrides.write() = Some(HashMap::new());
            }
        }
    }

    /// On-demand reload
    ///
    /// A failure is returned to the caller and leaves the cache as it was; if
    /// nothing was ever loaded the static fallback is installed first.
    pub async fn refresh(&self) -> AppResult<()> {
        match self.fetch_records().await {
            Ok(records) => {
                tracing::info!(count = records.len(), "Role permissions refreshed");
                *self.overrides.write() = Some(records);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to refresh role permissions");
                self.overrides.write().get_or_insert_with(HashMap::new);
                Err(e)
            }
        }
    }

    async fn fetch_records(&self) -> AppResult<HashMap<Role, RolePermissionRecord>> {
        let rows = self.backend.fetch_role_permissions().await?;
        Ok(collect_records(&self.nav, rows))
    }

    /// Effective permissions of a role
    pub fn resolve(&self, role: Role) -> ResolvedPermissions {
        let overrides = self.overrides.read();
        let record = overrides.as_ref().and_then(|o| o.get(&role));
        merge_permissions(role, &self.nav, record)
    }

    /// Resolved permissions of every role, in role order
    pub fn resolve_all(&self) -> Vec<ResolvedPermissions> {
        Role::ALL.into_iter().map(|role| self.resolve(role)).collect()
    }

    pub fn menu(&self, role: Role) -> Vec<NavLink> {
        let resolved = self.resolve(role);
        resolve_menu(&resolved, self.nav.items())
            .into_iter()
            .map(NavLink::from)
            .collect()
    }

    pub fn landing(&self, role: Role) -> Option<String> {
        let resolved = self.resolve(role);
        default_landing_route(&resolved, self.nav.items()).map(str::to_string)
    }

    pub fn is_route_allowed(&self, role: Role, path: &str) -> bool {
        let resolved = self.resolve(role);
        is_route_allowed_with(&resolved, path, self.nav.items(), self.policy)
    }

    /// Navigation guard for the current profile
    pub fn guard(&self, profile: Option<&Profile>, path: &str) -> GuardDecision {
        let Some(profile) = profile else {
            return GuardDecision::RedirectToRoot;
        };

        let decision = GuardDecision::from_allowed(self.is_route_allowed(profile.role, path));
        if !decision.is_allowed() {
            security_log!(
                "WARN",
                "route_denied",
                profile_id = profile.id.clone(),
                role = profile.role.as_str(),
                path = path.to_string()
            );
        }
        decision
    }

    /// Guard for a route restricted to an explicit role subset
    ///
    /// Same outcome for "no profile" and "wrong role".
    pub fn guard_roles(&self, profile: Option<&Profile>, allowed: &[Role]) -> GuardDecision {
        let decision = guard_role_route(profile, allowed);
        if let (Some(profile), false) = (profile, decision.is_allowed()) {
            security_log!(
                "WARN",
                "role_route_denied",
                profile_id = profile.id.clone(),
                role = profile.role.as_str(),
                allowed = format!("{:?}", allowed)
            );
        }
        decision
    }

    pub fn home(&self, role: Role) -> HomeRedirect {
        if !self.is_loaded() {
            return HomeRedirect::Pending;
        }
        let resolved = self.resolve(role);
        home_redirect(Some(&resolved), self.nav.items())
    }

    /// Switch one nav id on or off for a role (last write wins)
    ///
    /// The complete updated set is upserted. The cache only changes once the
    /// backend accepted the write.
    pub async fn toggle(
        &self,
        actor: &Profile,
        role: Role,
        nav_id: &str,
        enabled: bool,
    ) -> AppResult<ResolvedPermissions> {
        validate_permissions(&self.nav, [nav_id])?;

        let current = self.resolve(role);
        let record = toggle_permission(&current, nav_id, enabled);
        validate_permissions(&self.nav, &record.permissions)?;

        self.backend.upsert_role_permissions(&record).await?;

        security_log!(
            "INFO",
            "role_permissions_changed",
            actor_id = actor.id.clone(),
            role = role.as_str(),
            nav_id = nav_id.to_string(),
            enabled = enabled
        );

        self.overrides
            .write()
            .get_or_insert_with(HashMap::new)
            .insert(role, record);

        Ok(self.resolve(role))
    }
}

/// Validate backend rows; unknown roles are dropped, later rows win
///
/// Ids missing from the nav table are pruned so every cached record passes
/// [`validate_permissions`] again on the next toggle.
fn collect_records(nav: &NavTable, rows: Vec<RolePermissionRow>) -> HashMap<Role, RolePermissionRecord> {
    let mut records = HashMap::new();
    for row in rows {
        match RolePermissionRecord::try_from(row) {
            Ok(mut record) => {
                let before = record.permissions.len();
                record.permissions.retain(|id| nav.contains(id));
                if record.permissions.len() != before {
                    tracing::warn!(
                        role = %record.role,
                        dropped = before - record.permissions.len(),
                        "Ignoring unknown nav ids in role_permissions row"
                    );
                }
                records.insert(record.role, record);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping role_permissions row");
            }
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::permissions::PermissionSource;
    use async_trait::async_trait;
    use guest_client::{ClientError, ClientResult};
    use shared::models::Notification;
    use shared::ErrorCode;

    #[derive(Default)]
    struct StubBackend {
        rows: RwLock<Option<Vec<RolePermissionRow>>>,
        upserts: RwLock<Vec<RolePermissionRecord>>,
        reject_upsert: bool,
    }

    #[async_trait]
    impl Backend for StubBackend {
        async fn fetch_role_permissions(&self) -> ClientResult<Vec<RolePermissionRow>> {
            self.rows.read().clone().ok_or(ClientError::Backend {
                status: 503,
                message: "unavailable".into(),
            })
        }

        async fn upsert_role_permissions(&self, record: &RolePermissionRecord) -> ClientResult<()> {
            if self.reject_upsert {
                return Err(ClientError::Forbidden("row-level security".into()));
            }
            self.upserts.write().push(record.clone());
            Ok(())
        }

        async fn fetch_guest_notifications(
            &self,
            _guest_id: &str,
            _limit: usize,
        ) -> ClientResult<Vec<Notification>> {
            Ok(Vec::new())
        }
    }

    fn row(role: &str, ids: &[&str]) -> RolePermissionRow {
        RolePermissionRow {
            role: role.into(),
            permissions: ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn service(backend: Arc<StubBackend>) -> AccessService {
        AccessService::new(
            Arc::new(NavTable::default()),
            backend,
            UnmatchedRoutePolicy::Allow,
        )
    }

    #[tokio::test]
    async fn test_load_failure_falls_back_to_static() {
        let backend = Arc::new(StubBackend::default());
        let service = service(backend);

        assert!(!service.is_loaded());
        service.load().await;
        assert!(service.is_loaded());

        let resolved = service.resolve(Role::Sale);
        assert_eq!(resolved.source, PermissionSource::Static);
        assert_eq!(service.landing(Role::Sale).as_deref(), Some("/"));
    }

    #[tokio::test]
    async fn test_load_applies_backend_records_and_skips_unknown_roles() {
        let backend = Arc::new(StubBackend::default());
        *backend.rows.write() = Some(vec![
            row("Sale", &["dashboard", "tasks"]),
            row("Intern", &["settings"]),
        ]);
        let service = service(backend);
        service.load().await;

        let sale = service.resolve(Role::Sale);
        assert_eq!(sale.source, PermissionSource::Backend);
        assert!(service.is_route_allowed(Role::Sale, "/tasks"));
        assert!(!service.is_route_allowed(Role::Sale, "/vip-revenue"));

        assert_eq!(service.resolve(Role::Staff).source, PermissionSource::Static);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_previous_overrides() {
        let backend = Arc::new(StubBackend::default());
        *backend.rows.write() = Some(vec![row("Sale", &["tasks"])]);
        let service = service(backend.clone());
        service.load().await;

        *backend.rows.write() = None;
        let err = service.refresh().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::BackendError);
        assert_eq!(service.resolve(Role::Sale).source, PermissionSource::Backend);
    }

    #[tokio::test]
    async fn test_home_pending_before_load() {
        let service = service(Arc::new(StubBackend::default()));
        assert_eq!(service.home(Role::Admin), HomeRedirect::Pending);
        service.load().await;
        assert_eq!(
            service.home(Role::Admin),
            HomeRedirect::Redirect { to: "/".into() }
        );
    }

    #[tokio::test]
    async fn test_home_and_landing_agree_for_empty_record() {
        let backend = Arc::new(StubBackend::default());
        *backend.rows.write() = Some(vec![row("Nhân viên", &[])]);
        let service = service(backend);
        service.load().await;

        assert_eq!(service.resolve(Role::Staff).source, PermissionSource::Backend);
        assert_eq!(service.landing(Role::Staff).as_deref(), Some("/"));
        assert_eq!(
            service.home(Role::Staff),
            HomeRedirect::Redirect { to: "/".into() }
        );

        for role in Role::ALL {
            let landing = service.landing(role);
            match service.home(role) {
                HomeRedirect::Redirect { to } => assert_eq!(Some(to), landing),
                HomeRedirect::Pending => assert_eq!(landing, None),
            }
        }
    }

    #[tokio::test]
    async fn test_stale_ids_pruned_before_toggle() {
        let backend = Arc::new(StubBackend::default());
        *backend.rows.write() = Some(vec![row("Sale", &["dashboard", "reports-v1"])]);
        let service = service(backend.clone());
        service.load().await;
        assert!(!service.resolve(Role::Sale).contains("reports-v1"));

        let admin = Profile::new("admin-1", Role::Admin);
        service.toggle(&admin, Role::Sale, "tasks", true).await.unwrap();

        let upserts = backend.upserts.read();
        assert_eq!(
            upserts[0].permissions.iter().cloned().collect::<Vec<_>>(),
            vec!["dashboard".to_string(), "tasks".to_string()]
        );
    }

    #[tokio::test]
    async fn test_guard_roles() {
        let service = service(Arc::new(StubBackend::default()));
        let allowed = [Role::Admin, Role::Manager];

        let manager = Profile::new("u1", Role::Manager);
        let sale = Profile::new("u2", Role::Sale);
        assert_eq!(service.guard_roles(Some(&manager), &allowed), GuardDecision::Allow);
        assert_eq!(
            service.guard_roles(Some(&sale), &allowed),
            service.guard_roles(None, &allowed)
        );
        assert_eq!(service.guard_roles(None, &allowed), GuardDecision::RedirectToRoot);
    }

    #[tokio::test]
    async fn test_toggle_upserts_complete_set() {
        let backend = Arc::new(StubBackend::default());
        let service = service(backend.clone());
        service.load().await;
        let admin = Profile::new("admin-1", Role::Admin);

        let resolved = service.toggle(&admin, Role::Sale, "tasks", true).await.unwrap();
        assert_eq!(resolved.source, PermissionSource::Backend);
        assert!(resolved.contains("tasks"));
        assert!(resolved.contains("revenue"));

        let upserts = backend.upserts.read();
        assert_eq!(upserts.len(), 1);
        assert_eq!(upserts[0].permissions, resolved.permissions);
        drop(upserts);

        assert!(service.menu(Role::Sale).iter().any(|l| l.destination == "/tasks"));
    }

    #[tokio::test]
    async fn test_toggle_unknown_nav_id() {
        let backend = Arc::new(StubBackend::default());
        let service = service(backend.clone());
        let admin = Profile::new("admin-1", Role::Admin);

        let err = service.toggle(&admin, Role::Sale, "payroll", true).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NavItemNotFound);
        assert!(backend.upserts.read().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_rejected_leaves_cache_unchanged() {
        let backend = Arc::new(StubBackend {
            reject_upsert: true,
            ..Default::default()
        });
        let service = service(backend);
        service.load().await;
        let admin = Profile::new("admin-1", Role::Admin);

        let err = service.toggle(&admin, Role::Sale, "tasks", true).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert_eq!(service.resolve(Role::Sale).source, PermissionSource::Static);
    }

    #[tokio::test]
    async fn test_guard_without_profile() {
        let service = service(Arc::new(StubBackend::default()));
        service.load().await;
        assert_eq!(service.guard(None, "/"), GuardDecision::RedirectToRoot);

        let sale = Profile::new("u1", Role::Sale);
        assert_eq!(service.guard(Some(&sale), "/settings"), GuardDecision::RedirectToRoot);
        assert_eq!(service.guard(Some(&sale), "/vip-revenue/2026"), GuardDecision::Allow);
    }
}
