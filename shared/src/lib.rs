//! Shared types for the event hub
//!
//! Domain models (roles, navigation, notifications) and the unified error
//! system used by event-hub and guest-client.

pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
