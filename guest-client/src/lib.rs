//! Guest Client - HTTP client for the hosted backend
//!
//! Provides the [`Backend`] trait and its REST implementation [`HttpClient`].

pub mod backend;
pub mod config;
pub mod error;
pub mod http;

pub use backend::Backend;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
