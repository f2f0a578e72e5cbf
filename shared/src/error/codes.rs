//! Unified error codes for the event hub
//!
//! This module defines all error codes used across event-hub, guest-client and the UI shell.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Navigation errors
//! - 4xxx: Notification errors
//! - 5xxx: Local storage errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Navigation ====================
    /// Role string is not one of the known roles
    InvalidRole = 3001,
    /// Nav item id is not in the nav table
    NavItemNotFound = 3002,
    /// Nav table failed to load or is inconsistent
    NavTableInvalid = 3003,

    // ==================== 4xxx: Notification ====================
    /// Guest id missing from request
    GuestIdRequired = 4002,

    // ==================== 5xxx: Local storage ====================
    /// Writing local state failed
    StorageWriteFailed = 5002,
    /// Storage key rejected
    StorageKeyInvalid = 5003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Hosted backend returned an error
    BackendError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Navigation
            ErrorCode::InvalidRole => "Unknown role",
            ErrorCode::NavItemNotFound => "Navigation item not found",
            ErrorCode::NavTableInvalid => "Navigation table is invalid",

            // Notification
            ErrorCode::GuestIdRequired => "Guest id is required",

            // Storage
            ErrorCode::StorageWriteFailed => "Failed to write local state",
            ErrorCode::StorageKeyInvalid => "Invalid storage key",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::BackendError => "Backend error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),

            // Navigation
            3001 => Ok(ErrorCode::InvalidRole),
            3002 => Ok(ErrorCode::NavItemNotFound),
            3003 => Ok(ErrorCode::NavTableInvalid),

            // Notification
            4002 => Ok(ErrorCode::GuestIdRequired),

            // Storage
            5002 => Ok(ErrorCode::StorageWriteFailed),
            5003 => Ok(ErrorCode::StorageKeyInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::BackendError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::AdminRequired.code(), 2003);
        assert_eq!(ErrorCode::InvalidRole.code(), 3001);
        assert_eq!(ErrorCode::NavItemNotFound.code(), 3002);
        assert_eq!(ErrorCode::GuestIdRequired.code(), 4002);
        assert_eq!(ErrorCode::StorageWriteFailed.code(), 5002);
        assert_eq!(ErrorCode::BackendError.code(), 9002);
    }

    #[test]
    fn test_try_from_round_trips_every_listed_code() {
        for raw in [0u16, 2, 3, 5, 1001, 2001, 2003] {
            assert_eq!(ErrorCode::try_from(raw).unwrap().code(), raw);
        }
        for raw in [3001u16, 3002, 3003, 4002, 5002, 5003] {
            assert_eq!(ErrorCode::try_from(raw).unwrap().code(), raw);
        }
        for raw in [9001u16, 9002, 9003, 9004, 9005] {
            assert_eq!(ErrorCode::try_from(raw).unwrap().code(), raw);
        }
    }

    #[test]
    fn test_try_from_unknown_value() {
        assert_eq!(ErrorCode::try_from(1002), Err(InvalidErrorCode(1002)));
        assert_eq!(ErrorCode::try_from(4001), Err(InvalidErrorCode(4001)));
        assert_eq!(ErrorCode::try_from(65535), Err(InvalidErrorCode(65535)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::NavItemNotFound).unwrap();
        assert_eq!(json, "3002");

        let code: ErrorCode = serde_json::from_str("4002").unwrap();
        assert_eq!(code, ErrorCode::GuestIdRequired);

        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::ValidationFailed.is_success());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::PermissionDenied.to_string(), "2001");
    }
}
