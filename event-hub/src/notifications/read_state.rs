//! Per-guest read state
//!
//! Stored under `read_notifications_<guestId>` as a JSON array of ids.

use std::collections::BTreeSet;

use shared::models::Notification;

const KEY_PREFIX: &str = "read_notifications_";

/// Local store key holding a guest's read ids
pub fn storage_key(guest_id: &str) -> String {
    format!("{}{}", KEY_PREFIX, guest_id)
}

/// Notification ids a guest has acknowledged on this device
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadState {
    pub guest_id: String,
    pub ids: BTreeSet<String>,
}

impl ReadState {
    pub fn empty(guest_id: impl Into<String>) -> Self {
        Self {
            guest_id: guest_id.into(),
            ids: BTreeSet::new(),
        }
    }

    /// Parse stored content; anything but an array of strings is rejected
    pub fn from_json(guest_id: impl Into<String>, content: &str) -> Result<Self, serde_json::Error> {
        let ids: Vec<String> = serde_json::from_str(content)?;
        Ok(Self {
            guest_id: guest_id.into(),
            ids: ids.into_iter().collect(),
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.ids)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Whether `notification` counts as unread for this guest
    pub fn is_unread(&self, notification: &Notification) -> bool {
        notification.is_for(&self.guest_id) && !self.contains(&notification.id)
    }

    pub fn storage_key(&self) -> String {
        storage_key(&self.guest_id)
    }
}
