//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied (row-level security rejected the call)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success status from the backend
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Client could not be built from its configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) if e.is_timeout() => {
                AppError::with_message(ErrorCode::TimeoutError, e.to_string())
            }
            ClientError::Http(e) => AppError::network(e.to_string()),
            ClientError::InvalidResponse(msg) => AppError::backend(msg),
            ClientError::Unauthorized => AppError::not_authenticated(),
            ClientError::Forbidden(msg) => AppError::permission_denied(msg),
            ClientError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            ClientError::Validation(msg) => AppError::validation(msg),
            ClientError::Backend { status, message } => {
                AppError::backend(message).with_detail("status", status)
            }
            ClientError::Config(msg) => AppError::config(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_to_app_error_codes() {
        let err: AppError = ClientError::Unauthorized.into();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);

        let err: AppError = ClientError::Forbidden("row-level security".into()).into();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert_eq!(err.message, "row-level security");

        let err: AppError = ClientError::Backend {
            status: 500,
            message: "boom".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::BackendError);
        assert_eq!(err.details.unwrap().get("status").unwrap(), 500);

        let err: AppError = ClientError::Config("bad url".into()).into();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }
}
