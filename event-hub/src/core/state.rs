use std::path::Path;
use std::sync::Arc;

use guest_client::{Backend, HttpClient};
use shared::error::AppResult;

use crate::access::{AccessService, NavTable};
use crate::core::Config;
use crate::notifications::{GuestSessions, NotificationFeed};
use crate::storage::{FileStore, LocalStore};

/// 服务器状态 - 持有所有服务的共享引用
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | access | Arc<AccessService> | 菜单/路由/角色权限 |
/// | feed | Arc<NotificationFeed> | 通知拉取 |
/// | sessions | Arc<GuestSessions> | 每个客人的已读状态 |
///
/// 克隆只复制 `Arc`。
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub access: Arc<AccessService>,
    pub feed: Arc<NotificationFeed>,
    pub sessions: Arc<GuestSessions>,
}

impl ServerState {
    /// Wire services from explicit parts (tests, embedding)
    pub fn new(
        config: Config,
        nav: NavTable,
        backend: Arc<dyn Backend>,
        store: Arc<dyn LocalStore>,
    ) -> Self {
        let access = AccessService::new(Arc::new(nav), backend.clone(), config.unmatched_route_policy);
        let sessions = GuestSessions::with_capacity(store, config.guest_session_capacity);
        Self {
            config,
            access: Arc::new(access),
            feed: Arc::new(NotificationFeed::new(backend)),
            sessions: Arc::new(sessions),
        }
    }

    /// Build state from configuration and load role permissions
    ///
    /// Fails only on local problems (nav table, store directory, client
    /// construction); an unreachable backend falls back to static permissions.
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let nav = match &config.nav_table_path {
            Some(path) => {
                let table = NavTable::from_json_file(Path::new(path))?;
                tracing::info!(path = %path, items = table.items().len(), "Nav table loaded");
                table
            }
            None => NavTable::default(),
        };

        let store = FileStore::open(config.store_dir())?;
        tracing::info!(dir = %store.dir().display(), "Local store opened");

        let backend = HttpClient::new(&config.client_config())?;

        let state = Self::new(config.clone(), nav, Arc::new(backend), Arc::new(store));
        state.access.load().await;
        Ok(state)
    }
}
