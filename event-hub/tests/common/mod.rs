#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use chrono::{TimeZone, Utc};
use event_hub::{Config, MemoryStore, NavTable, ServerState};
use guest_client::{Backend, ClientError, ClientResult};
use http::{Request, Response};
use http_body_util::BodyExt;
use parking_lot::RwLock;
use serde_json::Value;
use shared::models::{
    Notification, NotificationKind, NotificationTarget, RolePermissionRecord, RolePermissionRow,
};
use tower::ServiceExt;

/// In-memory stand-in for the hosted backend
#[derive(Default)]
pub struct MockBackend {
    pub role_rows: RwLock<Vec<RolePermissionRow>>,
    pub notifications: RwLock<Vec<Notification>>,
    pub upserts: RwLock<Vec<RolePermissionRecord>>,
    pub fail_reads: RwLock<bool>,
}

impl MockBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self, failing: bool) {
        *self.fail_reads.write() = failing;
    }

    fn unavailable() -> ClientError {
        ClientError::Backend {
            status: 503,
            message: "backend unavailable".into(),
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn fetch_role_permissions(&self) -> ClientResult<Vec<RolePermissionRow>> {
        if *self.fail_reads.read() {
            return Err(Self::unavailable());
        }
        Ok(self.role_rows.read().clone())
    }

    async fn upsert_role_permissions(&self, record: &RolePermissionRecord) -> ClientResult<()> {
        self.upserts.write().push(record.clone());
        let mut rows = self.role_rows.write();
        rows.retain(|row| row.role != record.role.as_str());
        rows.push(RolePermissionRow::from(record));
        Ok(())
    }

    async fn fetch_guest_notifications(
        &self,
        _guest_id: &str,
        _limit: usize,
    ) -> ClientResult<Vec<Notification>> {
        if *self.fail_reads.read() {
            return Err(Self::unavailable());
        }
        Ok(self.notifications.read().clone())
    }
}

pub fn notification(id: &str, target: &str, kind: NotificationKind, minute: u32) -> Notification {
    Notification {
        id: id.into(),
        guest_id: NotificationTarget::from(target.to_string()),
        content: format!("Thông báo {}", id),
        kind,
        created_at: Utc.with_ymd_and_hms(2026, 5, 20, 10, minute, 0).unwrap(),
    }
}

/// State over the default nav table, the mock and an in-memory store
pub async fn state_with(backend: Arc<MockBackend>) -> ServerState {
    let config = Config::with_overrides(std::env::temp_dir().to_string_lossy(), 0);
    let state = ServerState::new(
        config,
        NavTable::default(),
        backend,
        Arc::new(MemoryStore::new()),
    );
    state.access.load().await;
    state
}

pub fn app(state: ServerState) -> Router {
    event_hub::api::build_app(state)
}

pub fn get(uri: &str, role: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(role) = role {
        builder = builder
            .header(event_hub::api::PROFILE_ID_HEADER, "user-1")
            .header(event_hub::api::PROFILE_ROLE_HEADER, urlencoding::encode(role).into_owned());
    }
    builder.body(Body::empty()).unwrap()
}

pub fn send_json(method: &str, uri: &str, role: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(role) = role {
        builder = builder
            .header(event_hub::api::PROFILE_ID_HEADER, "user-1")
            .header(event_hub::api::PROFILE_ROLE_HEADER, urlencoding::encode(role).into_owned());
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn call(app: &Router, request: Request<Body>) -> (http::StatusCode, Value) {
    let response: Response<Body> = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
