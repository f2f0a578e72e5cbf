//! ReadTracker - 已读状态跟踪
//!
//! Memory is the source of truth. Every change is written through to the
//! local store; a failed write is logged and the in-memory state stays.

use std::sync::Arc;

use shared::models::Notification;

use super::feed::unread_count;
use super::read_state::{ReadState, storage_key};
use crate::storage::LocalStore;

pub struct ReadTracker {
    state: ReadState,
    store: Arc<dyn LocalStore>,
}

impl ReadTracker {
    /// Load a guest's read state; never fails
    pub fn load(guest_id: &str, store: Arc<dyn LocalStore>) -> Self {
        let key = storage_key(guest_id);
        let state = match store.get(&key) {
            Ok(Some(content)) => ReadState::from_json(guest_id, &content).unwrap_or_else(|e| {
                tracing::warn!(guest_id = %guest_id, error = %e, "Discarding malformed read state");
                ReadState::empty(guest_id)
            }),
            Ok(None) => ReadState::empty(guest_id),
            Err(e) => {
                tracing::warn!(guest_id = %guest_id, error = %e, "Failed to read read state");
                ReadState::empty(guest_id)
            }
        };

        Self { state, store }
    }

    pub fn guest_id(&self) -> &str {
        &self.state.guest_id
    }

    pub fn state(&self) -> &ReadState {
        &self.state
    }

    pub fn is_read(&self, id: &str) -> bool {
        self.state.contains(id)
    }

    /// Mark a single notification as read
    ///
    /// Returns `false` (and writes nothing) when the id was already read.
    pub fn mark_one_as_read(&mut self, id: &str) -> bool {
        if !self.state.ids.insert(id.to_string()) {
            return false;
        }
        self.persist();
        true
    }

    /// Replace the read set with exactly the ids of `feed`
    pub fn mark_all_as_read(&mut self, feed: &[Notification]) {
        self.state.ids = feed.iter().map(|n| n.id.clone()).collect();
        self.persist();
    }

    pub fn unread_count(&self, feed: &[Notification]) -> usize {
        unread_count(feed, &self.state)
    }

    fn persist(&self) {
        let key = self.state.storage_key();
        let result = self
            .state
            .to_json()
            .map_err(|e| e.to_string())
            .and_then(|json| self.store.set(&key, &json).map_err(|e| e.to_string()));

        if let Err(e) = result {
            tracing::warn!(
                guest_id = %self.state.guest_id,
                error = %e,
                "Failed to persist read state"
            );
        }
    }
}
