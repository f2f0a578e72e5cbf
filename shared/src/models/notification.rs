//! Guest Notification Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target value meaning "every guest"
pub const BROADCAST_TARGET: &str = "all";

/// Who a notification is addressed to
///
/// Stored in the `guest_id` column: either a guest id or [`BROADCAST_TARGET`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationTarget {
    All,
    Guest(String),
}

impl NotificationTarget {
    /// Whether a guest sees notifications with this target
    pub fn includes(&self, guest_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Guest(id) => id == guest_id,
        }
    }
}

impl From<String> for NotificationTarget {
    fn from(value: String) -> Self {
        if value == BROADCAST_TARGET {
            Self::All
        } else {
            Self::Guest(value)
        }
    }
}

impl From<NotificationTarget> for String {
    fn from(target: NotificationTarget) -> Self {
        match target {
            NotificationTarget::All => BROADCAST_TARGET.to_string(),
            NotificationTarget::Guest(id) => id,
        }
    }
}

/// Which checklist tab a notification belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Task,
    Benefit,
    Timeline,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 3] = [
        NotificationKind::Task,
        NotificationKind::Benefit,
        NotificationKind::Timeline,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Benefit => "benefit",
            Self::Timeline => "timeline",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `guest_notifications` row (server-owned, immutable)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub guest_id: NotificationTarget,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_for(&self, guest_id: &str) -> bool {
        self.guest_id.includes(guest_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_from_wire() {
        assert_eq!(NotificationTarget::from("all".to_string()), NotificationTarget::All);
        assert_eq!(
            NotificationTarget::from("g1".to_string()),
            NotificationTarget::Guest("g1".into())
        );
    }

    #[test]
    fn test_target_includes() {
        assert!(NotificationTarget::All.includes("anyone"));
        assert!(NotificationTarget::Guest("g1".into()).includes("g1"));
        assert!(!NotificationTarget::Guest("g1".into()).includes("g2"));
    }

    #[test]
    fn test_notification_row_deserialize() {
        let row = r#"{
            "id": "5b1f",
            "guest_id": "all",
            "content": "Lịch trình đã cập nhật",
            "type": "timeline",
            "created_at": "2026-03-01T09:30:00Z"
        }"#;
        let n: Notification = serde_json::from_str(row).unwrap();
        assert_eq!(n.guest_id, NotificationTarget::All);
        assert_eq!(n.kind, NotificationKind::Timeline);
        assert!(n.is_for("g42"));

        let back = serde_json::to_value(&n).unwrap();
        assert_eq!(back["guest_id"], "all");
        assert_eq!(back["type"], "timeline");
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let row = r#"{"id":"1","guest_id":"g1","content":"x","type":"invoice","created_at":"2026-03-01T09:30:00Z"}"#;
        assert!(serde_json::from_str::<Notification>(row).is_err());
    }
}
