//! GuestSessions - 客人会话缓存
//!
//! One entry per guest seen by this device: the read tracker plus the feed
//! snapshot the guest was last shown. `read-all` acknowledges exactly that
//! snapshot, so notifications arriving later still count as unread.
//!
//! The map is bounded: past `capacity` the least recently used entry is
//! dropped. Read state is already persisted, so an evicted guest simply
//! reloads it (and refetches the feed) on the next request.
//!
//! Session calls touch the local store synchronously; async callers run them
//! on the blocking pool.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::Serialize;
use shared::models::{Notification, NotificationKind};

use super::feed::unread_by_kind;
use super::tracker::ReadTracker;
use crate::storage::LocalStore;

/// Default upper bound of cached guest sessions
pub const DEFAULT_SESSION_CAPACITY: usize = 256;

pub struct GuestSession {
    pub tracker: ReadTracker,
    /// Latest fetched feed; `None` until the first successful fetch
    pub feed: Option<Vec<Notification>>,
    last_used: u64,
}

impl GuestSession {
    fn load(guest_id: &str, store: Arc<dyn LocalStore>) -> Self {
        Self {
            tracker: ReadTracker::load(guest_id, store),
            feed: None,
            last_used: 0,
        }
    }

    /// Feed with read flags and unread counters
    pub fn view(&self) -> FeedView {
        let feed = self.feed.as_deref().unwrap_or_default();
        let state = self.tracker.state();

        FeedView {
            items: feed
                .iter()
                .map(|n| FeedEntry {
                    notification: n.clone(),
                    read: self.tracker.is_read(&n.id),
                })
                .collect(),
            unread_count: self.tracker.unread_count(feed),
            unread_by_kind: unread_by_kind(feed, state),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedEntry {
    #[serde(flatten)]
    pub notification: Notification,
    pub read: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedView {
    pub items: Vec<FeedEntry>,
    pub unread_count: usize,
    pub unread_by_kind: BTreeMap<NotificationKind, usize>,
}

pub struct GuestSessions {
    store: Arc<dyn LocalStore>,
    sessions: DashMap<String, GuestSession>,
    capacity: usize,
    clock: AtomicU64,
}

impl GuestSessions {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self::with_capacity(store, DEFAULT_SESSION_CAPACITY)
    }

    pub fn with_capacity(store: Arc<dyn LocalStore>, capacity: usize) -> Self {
        Self {
            store,
            sessions: DashMap::new(),
            capacity: capacity.max(1),
            clock: AtomicU64::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Run `f` against a guest's session, loading it on first use
    ///
    /// The entry stays locked while `f` runs; `f` must not await.
    pub fn with_session<R>(&self, guest_id: &str, f: impl FnOnce(&mut GuestSession) -> R) -> R {
        if !self.sessions.contains_key(guest_id) {
            self.evict_down_to(self.capacity - 1);
        }

        let mut entry = self
            .sessions
            .entry(guest_id.to_string())
            .or_insert_with(|| GuestSession::load(guest_id, self.store.clone()));
        entry.last_used = self.clock.fetch_add(1, Ordering::Relaxed);
        f(entry.value_mut())
    }

    /// Drop least recently used sessions until at most `max` remain
    ///
    /// Must not be called while holding an entry of the map.
    fn evict_down_to(&self, max: usize) {
        while self.sessions.len() > max {
            let oldest = self
                .sessions
                .iter()
                .min_by_key(|entry| entry.last_used)
                .map(|entry| entry.key().clone());
            let Some(guest_id) = oldest else {
                break;
            };
            self.sessions.remove(&guest_id);
            tracing::debug!(guest_id = %guest_id, "Guest session evicted");
        }
    }

    /// Store a freshly fetched feed and return the resulting view
    pub fn replace_feed(&self, guest_id: &str, feed: Vec<Notification>) -> FeedView {
        self.with_session(guest_id, |session| {
            session.feed = Some(feed);
            session.view()
        })
    }

    pub fn has_feed(&self, guest_id: &str) -> bool {
        self.sessions
            .get(guest_id)
            .is_some_and(|session| session.feed.is_some())
    }

    pub fn mark_one_as_read(&self, guest_id: &str, id: &str) -> FeedView {
        self.with_session(guest_id, |session| {
            if session.tracker.mark_one_as_read(id) {
                tracing::debug!(guest_id = %guest_id, notification_id = %id, "Notification marked as read");
            }
            session.view()
        })
    }

    /// Acknowledge the current snapshot
    pub fn mark_all_as_read(&self, guest_id: &str) -> FeedView {
        self.with_session(guest_id, |session| {
            let feed = session.feed.as_deref().unwrap_or_default();
            session.tracker.mark_all_as_read(feed);
            tracing::debug!(guest_id = %guest_id, count = feed.len(), "All notifications marked as read");
            session.view()
        })
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
