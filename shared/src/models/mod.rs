//! Data models
//!
//! Shared between event-hub, guest-client and the UI shell (via API).

pub mod nav;
pub mod notification;
pub mod profile;
pub mod role;

// Re-exports
pub use nav::*;
pub use notification::*;
pub use profile::*;
pub use role::*;
