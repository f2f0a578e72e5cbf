//! 客人通知已读跟踪
//!
//! - [`feed`] - 通知列表拉取 (最多 50 条，最新在前)
//! - [`read_state`] - 已读 id 集合及其存储键
//! - [`tracker`] - [`ReadTracker`]，内存为准，写穿到本地存储
//! - [`sessions`] - 每个客人的 tracker + 最近一次拉取的列表 (LRU 上限)

pub mod feed;
pub mod read_state;
pub mod sessions;
pub mod tracker;

pub use feed::{FEED_LIMIT, NotificationFeed, unread_by_kind, unread_count};
pub use read_state::{ReadState, storage_key};
pub use sessions::{DEFAULT_SESSION_CAPACITY, FeedEntry, FeedView, GuestSession, GuestSessions};
pub use tracker::ReadTracker;
