//! Notification feed
//!
//! Bounded, newest-first list of notifications addressed to a guest or to
//! everyone. The backend query already applies the contract; results are
//! filtered, ordered and truncated again here before anyone counts them.

use std::collections::BTreeMap;
use std::sync::Arc;

use guest_client::Backend;
use shared::error::AppResult;
use shared::models::{Notification, NotificationKind};

use super::read_state::ReadState;

/// Most recent notifications shown to a guest
pub const FEED_LIMIT: usize = 50;

pub struct NotificationFeed {
    backend: Arc<dyn Backend>,
    limit: usize,
}

impl NotificationFeed {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            limit: FEED_LIMIT,
        }
    }

    /// Fetch a guest's feed
    ///
    /// `Ok(None)` means the query was not run because there is no guest id.
    pub async fn fetch(&self, guest_id: Option<&str>) -> AppResult<Option<Vec<Notification>>> {
        let Some(guest_id) = guest_id.map(str::trim).filter(|id| !id.is_empty()) else {
            return Ok(None);
        };

        let rows = self
            .backend
            .fetch_guest_notifications(guest_id, self.limit)
            .await
            .inspect_err(|e| {
                tracing::warn!(guest_id = %guest_id, error = %e, "Failed to fetch notifications")
            })?;

        let fetched = rows.len();
        let feed = enforce_contract(rows, guest_id, self.limit);
        tracing::debug!(guest_id = %guest_id, fetched, kept = feed.len(), "Notification feed loaded");

        Ok(Some(feed))
    }
}

fn enforce_contract(rows: Vec<Notification>, guest_id: &str, limit: usize) -> Vec<Notification> {
    let mut feed: Vec<Notification> = rows.into_iter().filter(|n| n.is_for(guest_id)).collect();
    feed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    feed.truncate(limit);
    feed
}

/// Feed entries addressed to the guest that are not in the read set
pub fn unread_count(feed: &[Notification], state: &ReadState) -> usize {
    feed.iter().filter(|n| state.is_unread(n)).count()
}

/// Unread counts per checklist tab; every kind is present
pub fn unread_by_kind(feed: &[Notification], state: &ReadState) -> BTreeMap<NotificationKind, usize> {
    let mut counts: BTreeMap<NotificationKind, usize> =
        NotificationKind::ALL.into_iter().map(|kind| (kind, 0)).collect();
    for n in feed.iter().filter(|n| state.is_unread(n)) {
        *counts.entry(n.kind).or_default() += 1;
    }
    counts
}
